use super::*;

fn item(sku: &str) -> Route {
    Route::Item {
        sku: sku.to_string(),
    }
}

#[test]
fn unauthenticated_starts_on_auth_menu() {
    let mut nav = Navigator::new(false);
    assert_eq!(nav.layout(), Layout::Auth);
    assert_eq!(nav.current(), &Route::AuthMenu);
    assert_eq!(nav.take_focus(), Some(Route::AuthMenu));
    assert_eq!(nav.take_focus(), None);
}

#[test]
fn authenticated_starts_on_inventory() {
    let nav = Navigator::new(true);
    assert_eq!(nav.layout(), Layout::Main);
    assert_eq!(nav.active_tab(), Tab::Inventory);
    assert_eq!(nav.current(), &Route::InventoryHome);
}

#[test]
fn sync_layout_switches_only_on_change() {
    let mut nav = Navigator::new(false);
    nav.push(Route::SignIn);
    assert!(!nav.sync_layout(false));
    assert_eq!(nav.current(), &Route::SignIn);

    assert!(nav.sync_layout(true));
    assert_eq!(nav.current(), &Route::InventoryHome);

    nav.push(item("A1"));
    assert!(nav.sync_layout(false));
    assert_eq!(nav.current(), &Route::AuthMenu);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn going_back_refocuses_previous_route() {
    let mut nav = Navigator::new(true);
    nav.push(item("A1"));
    nav.push(Route::Edit {
        sku: "A1".to_string(),
    });
    nav.take_focus();

    assert!(nav.go_back());
    assert_eq!(nav.take_focus(), Some(item("A1")));

    assert!(nav.go_back());
    assert_eq!(nav.take_focus(), Some(Route::InventoryHome));
}

#[test]
fn go_back_at_root_is_rejected() {
    let mut nav = Navigator::new(true);
    nav.take_focus();
    assert!(!nav.go_back());
    assert_eq!(nav.take_focus(), None);
    assert_eq!(nav.current(), &Route::InventoryHome);
}

#[test]
fn pop_to_top_keeps_root() {
    let mut nav = Navigator::new(true);
    nav.switch_tab(Tab::Sell);
    nav.push(Route::Sell {
        sku: "A1".to_string(),
    });

    nav.pop_to_top();

    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.current(), &Route::Scanner);
}

#[test]
fn tabs_keep_their_own_stacks() {
    let mut nav = Navigator::new(true);
    nav.push(item("A1"));

    nav.switch_tab(Tab::Profile);
    assert_eq!(nav.current(), &Route::Profile);

    nav.switch_tab(Tab::Inventory);
    assert_eq!(nav.current(), &item("A1"));
    assert_eq!(nav.take_focus(), Some(item("A1")));
}

#[test]
fn tab_switch_ignored_in_auth_layout() {
    let mut nav = Navigator::new(false);
    nav.switch_tab(Tab::Sell);
    assert_eq!(nav.current(), &Route::AuthMenu);
}

#[test]
fn tab_roots() {
    assert_eq!(Tab::Inventory.root(), Route::InventoryHome);
    assert_eq!(Tab::Sell.root(), Route::Scanner);
    assert_eq!(Tab::Profile.root(), Route::Profile);
}
