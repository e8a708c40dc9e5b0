//! Navigation shell: an unauthenticated stack and an authenticated tab layout
//! with one stack per tab.
//!
//! Whenever a route becomes visible the navigator records a focus event.
//! Screens drain it with [`Navigator::take_focus`] and re-fetch their data,
//! since every product view is a snapshot of remote state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Inventory,
    Sell,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Inventory, Tab::Sell, Tab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Inventory => "Estoque",
            Tab::Sell => "Vender",
            Tab::Profile => "Perfil",
        }
    }

    pub fn root(&self) -> Route {
        match self {
            Tab::Inventory => Route::InventoryHome,
            Tab::Sell => Route::Scanner,
            Tab::Profile => Route::Profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    AuthMenu,
    SignIn,
    SignUp,
    TokenConfirm,
    InventoryHome,
    /// Barcode reader; what a scan opens depends on the active tab
    Scanner,
    Item { sku: String },
    Edit { sku: String },
    Sell { sku: String },
    Profile,
}

static FALLBACK_ROUTE: Route = Route::AuthMenu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Sign in / sign up / token confirmation stack
    Auth,
    /// Tab layout shown while a session token exists
    Main,
}

#[derive(Debug)]
pub struct Navigator {
    layout: Layout,
    auth_stack: Vec<Route>,
    tab_stacks: [Vec<Route>; 3],
    active_tab: Tab,
    pending_focus: Option<Route>,
}

impl Navigator {
    pub fn new(signed_in: bool) -> Self {
        let mut navigator = Self {
            layout: Layout::Auth,
            auth_stack: Vec::new(),
            tab_stacks: Default::default(),
            active_tab: Tab::Inventory,
            pending_focus: None,
        };
        navigator.reset(signed_in);
        navigator
    }

    /// Picks the layout for the session state. Stacks are reset only when
    /// the layout actually changes.
    pub fn sync_layout(&mut self, signed_in: bool) -> bool {
        let wanted = if signed_in { Layout::Main } else { Layout::Auth };
        if wanted == self.layout {
            return false;
        }
        log::info!("Switching navigation layout to {:?}", wanted);
        self.reset(signed_in);
        true
    }

    fn reset(&mut self, signed_in: bool) {
        self.layout = if signed_in { Layout::Main } else { Layout::Auth };
        self.auth_stack = vec![Route::AuthMenu];
        self.tab_stacks = Tab::ALL.map(|tab| vec![tab.root()]);
        self.active_tab = Tab::Inventory;
        self.focus();
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    fn stack(&self) -> &Vec<Route> {
        match self.layout {
            Layout::Auth => &self.auth_stack,
            Layout::Main => &self.tab_stacks[tab_index(self.active_tab)],
        }
    }

    fn stack_mut(&mut self) -> &mut Vec<Route> {
        match self.layout {
            Layout::Auth => &mut self.auth_stack,
            Layout::Main => &mut self.tab_stacks[tab_index(self.active_tab)],
        }
    }

    pub fn current(&self) -> &Route {
        // Stacks always keep their root route.
        self.stack().last().unwrap_or(&FALLBACK_ROUTE)
    }

    pub fn depth(&self) -> usize {
        self.stack().len()
    }

    pub fn push(&mut self, route: Route) {
        log::debug!("Navigate to {:?}", route);
        self.stack_mut().push(route);
        self.focus();
    }

    /// Pops the current route. Returns `false` at the root of the stack.
    pub fn go_back(&mut self) -> bool {
        if self.stack().len() <= 1 {
            return false;
        }
        self.stack_mut().pop();
        self.focus();
        true
    }

    pub fn pop_to_top(&mut self) {
        self.stack_mut().truncate(1);
        self.focus();
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.layout != Layout::Main {
            log::warn!("Ignoring tab switch to {:?} outside the main layout", tab);
            return;
        }
        self.active_tab = tab;
        self.focus();
    }

    /// The route that became visible since the last call, if any.
    pub fn take_focus(&mut self) -> Option<Route> {
        self.pending_focus.take()
    }

    fn focus(&mut self) {
        self.pending_focus = Some(self.current().clone());
    }
}

fn tab_index(tab: Tab) -> usize {
    match tab {
        Tab::Inventory => 0,
        Tab::Sell => 1,
        Tab::Profile => 2,
    }
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
