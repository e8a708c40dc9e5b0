//! Inventory home: searchable, sortable product table with infinite scroll.

use std::time::{Duration, Instant};

use cantinho_client::formatters::format_currency;
use cantinho_client::listing::{InventoryList, PageRequest, SortColumn};
use cantinho_client::{ApiResult, Product, Route};
use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::ui::state::{Services, Shell};
use crate::ui::task::{Pending, TaskPoll};

/// Wait this long after the last keystroke before searching
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct InventoryState {
    list: InventoryList,
    fetch: Option<(PageRequest, Pending<ApiResult<Vec<Product>>>)>,
    search_edited_at: Option<Instant>,
}

impl InventoryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            list: InventoryList::new(page_size),
            fetch: None,
            search_edited_at: None,
        }
    }

    pub fn list(&self) -> &InventoryList {
        &self.list
    }

    /// Reloads from page 1; runs whenever the screen regains focus.
    pub fn refresh(&mut self, ctx: &egui::Context, services: &Services) {
        let request = self.list.refresh();
        self.start_fetch(request, ctx, services);
    }

    fn submit_search(&mut self, ctx: &egui::Context, services: &Services) {
        self.search_edited_at = None;
        let request = self.list.submit_search();
        log::info!("Searching inventory for '{}'", self.list.search());
        self.start_fetch(request, ctx, services);
    }

    fn load_more(&mut self, ctx: &egui::Context, services: &Services) {
        if let Some(request) = self.list.load_more() {
            log::debug!("Loading inventory page {}", request.query.page);
            self.start_fetch(request, ctx, services);
        }
    }

    fn start_fetch(&mut self, request: PageRequest, ctx: &egui::Context, services: &Services) {
        let api = services.api.clone();
        let query = request.query.clone();
        let pending = Pending::spawn(&services.runtime, ctx, async move {
            api.list_products(&query).await
        });
        // A replaced fetch keeps running; its page is dropped as stale
        self.fetch = Some((request, pending));
    }

    fn check_debounced_search(&mut self, ctx: &egui::Context, services: &Services) {
        let Some(edited_at) = self.search_edited_at else {
            return;
        };
        if edited_at.elapsed() < SEARCH_DEBOUNCE {
            ctx.request_repaint_after(SEARCH_DEBOUNCE);
            return;
        }
        if self.list.search_input.trim() != self.list.search() {
            self.submit_search(ctx, services);
        } else {
            self.search_edited_at = None;
        }
    }

    fn poll(&mut self, shell: &mut Shell) {
        let Some((request, pending)) = self.fetch.as_mut() else {
            return;
        };
        match pending.poll() {
            TaskPoll::Waiting => return,
            TaskPoll::Ready(Ok(products)) => {
                log::info!("Loaded {} products (page {})", products.len(), request.query.page);
                self.list.apply_page(request, products);
            }
            TaskPoll::Ready(Err(e)) => {
                self.list.fail_page(request);
                shell.report_error("Erro ao carregar os itens.", &e);
            }
            TaskPoll::Lost => self.list.fail_page(request),
        }
        self.fetch = None;
    }
}

pub struct InventoryScreen;

impl InventoryScreen {
    pub fn show(ctx: &egui::Context, services: &Services, shell: &mut Shell, state: &mut InventoryState) {
        state.poll(shell);
        state.check_debounced_search(ctx, services);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.list.search_input)
                        .hint_text("Buscar por nome ou SKU...")
                        .desired_width(ui.available_width() - 110.0),
                );
                if response.changed() {
                    state.search_edited_at = Some(Instant::now());
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    state.submit_search(ctx, services);
                }
                if ui.button("📷 Escanear").clicked() {
                    shell.push(Route::Scanner);
                }
            });
            ui.add_space(8.0);

            if state.list.is_empty_result() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label("Nenhum item encontrado.");
                });
                return;
            }

            if let Some(route) = Self::show_table(ui, ctx, services, state) {
                shell.push(route);
            }
        });
    }

    fn sort_header(ui: &mut egui::Ui, state: &mut InventoryState, column: SortColumn) {
        let arrow = match state.list.sort() {
            Some(filter) if filter.column == column => filter.direction.arrow(),
            _ => "",
        };
        if ui
            .button(format!("{} {}", column.label(), arrow))
            .clicked()
        {
            state.list.toggle_sort(column);
        }
    }

    fn show_table(
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        services: &Services,
        state: &mut InventoryState,
    ) -> Option<Route> {
        let mut opened = None;
        let mut reached_end = false;
        let row_count = state.list.items().len();

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(140.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .header(28.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Item");
                });
                header.col(|ui| Self::sort_header(ui, state, SortColumn::Quantity));
                header.col(|ui| Self::sort_header(ui, state, SortColumn::BuyPrice));
                header.col(|ui| Self::sort_header(ui, state, SortColumn::SellPrice));
            })
            .body(|body| {
                let items = state.list.items();
                body.rows(26.0, row_count, |mut row| {
                    let index = row.index();
                    if index + 1 == row_count {
                        reached_end = true;
                    }
                    let product = &items[index];
                    row.col(|ui| {
                        let label = if product.is_deleted() {
                            format!("{} (excluído)", product.name)
                        } else {
                            product.name.clone()
                        };
                        if ui.link(label).on_hover_text(&product.sku).clicked() {
                            opened = Some(Route::Item {
                                sku: product.sku.clone(),
                            });
                        }
                    });
                    row.col(|ui| {
                        ui.label(product.inventory.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_currency(product.buy_price));
                    });
                    row.col(|ui| {
                        ui.label(format_currency(product.sell_price));
                    });
                });
            });

        if state.list.is_loading() {
            ui.vertical_centered(|ui| ui.spinner());
        }
        if reached_end {
            state.load_more(ctx, services);
        }
        opened
    }
}
