//! Inventory list state: search, offset pagination and client-side sorting.

use crate::models::{Product, ProductQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Quantity,
    BuyPrice,
    SellPrice,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [SortColumn::Quantity, SortColumn::BuyPrice, SortColumn::SellPrice];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Quantity => "QTD.",
            SortColumn::BuyPrice => "Compra",
            SortColumn::SellPrice => "V (cartão)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortFilter {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortFilter {
    /// Filter after the user taps `column`: a new column sorts ascending,
    /// the active column flips direction.
    pub fn select(current: Option<SortFilter>, column: SortColumn) -> SortFilter {
        match current {
            Some(active) if active.column == column => SortFilter {
                column,
                direction: active.direction.toggled(),
            },
            _ => SortFilter {
                column,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Stable sort of `items` by the filter's column.
pub fn sort_products(items: &mut [Product], filter: SortFilter) {
    items.sort_by(|a, b| {
        let ordering = match filter.column {
            SortColumn::Quantity => a.inventory.cmp(&b.inventory),
            SortColumn::BuyPrice => a.buy_price.total_cmp(&b.buy_price),
            SortColumn::SellPrice => a.sell_price.total_cmp(&b.sell_price),
        };
        match filter.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// A page fetch issued by [`InventoryList`]; results from an older
/// generation are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub generation: u64,
    pub query: ProductQuery,
}

#[derive(Debug)]
pub struct InventoryList {
    /// Text currently in the search box
    pub search_input: String,
    search: String,
    step: u32,
    items: Vec<Product>,
    pages_loaded: u32,
    loading: bool,
    exhausted: bool,
    loaded_once: bool,
    sort: Option<SortFilter>,
    generation: u64,
}

impl InventoryList {
    pub fn new(step: u32) -> Self {
        Self {
            search_input: String::new(),
            search: String::new(),
            step: step.max(1),
            items: Vec::new(),
            pages_loaded: 0,
            loading: false,
            exhausted: false,
            loaded_once: false,
            sort: None,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortFilter> {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    /// A fetch completed and nothing matched
    pub fn is_empty_result(&self) -> bool {
        self.loaded_once && self.items.is_empty() && !self.loading
    }

    /// Back to page 1 and returns the request for it. Used on focus and
    /// whenever the search is submitted.
    pub fn refresh(&mut self) -> PageRequest {
        self.generation += 1;
        self.items.clear();
        self.pages_loaded = 0;
        self.exhausted = false;
        self.loaded_once = false;
        self.loading = true;
        log::debug!("Inventory list reset (search '{}')", self.search);
        self.request_for_page(1)
    }

    /// Submits the search box content and restarts from page 1.
    pub fn submit_search(&mut self) -> PageRequest {
        self.search = self.search_input.trim().to_string();
        self.refresh()
    }

    /// Whether reaching the end of the list should fetch another page.
    pub fn should_load_more(&self) -> bool {
        !self.loading
            && !self.exhausted
            && self.pages_loaded > 0
            && self.items.len() as u64 >= self.pages_loaded as u64 * self.step as u64
    }

    /// Request for the next page when the visible list reached the page boundary.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.should_load_more() {
            return None;
        }
        self.loading = true;
        Some(self.request_for_page(self.pages_loaded + 1))
    }

    fn request_for_page(&self, page: u32) -> PageRequest {
        PageRequest {
            generation: self.generation,
            query: ProductQuery {
                search: self.search.clone(),
                page,
                step: self.step,
                with_deleted: false,
            },
        }
    }

    /// Appends a fetched page. Returns `false` when the response is stale.
    pub fn apply_page(&mut self, request: &PageRequest, products: Vec<Product>) -> bool {
        if request.generation != self.generation {
            log::debug!("Dropping stale page {}", request.query.page);
            return false;
        }
        self.loading = false;
        self.loaded_once = true;
        self.pages_loaded = request.query.page;
        if products.is_empty() {
            self.exhausted = true;
            return true;
        }
        self.items.extend(products);
        if let Some(filter) = self.sort {
            sort_products(&mut self.items, filter);
        }
        true
    }

    /// Marks a failed fetch; the list keeps what it had.
    pub fn fail_page(&mut self, request: &PageRequest) {
        if request.generation == self.generation {
            self.loading = false;
            self.loaded_once = true;
        }
    }

    /// Applies a sort column tap to the loaded items.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        let filter = SortFilter::select(self.sort, column);
        self.sort = Some(filter);
        sort_products(&mut self.items, filter);
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
