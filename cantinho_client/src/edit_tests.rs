use chrono::{TimeZone, Utc};

use super::*;

fn product() -> Product {
    Product {
        sku: "CAN-1".to_string(),
        name: "Caneta azul".to_string(),
        buy_price: 1.5,
        sell_price: 3.0,
        sell_price_cash: 2.75,
        inventory: 12,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: None,
        deleted_at: None,
        qr_code: String::new(),
    }
}

#[test]
fn form_is_prefilled_from_product() {
    let form = EditForm::from_product(&product());
    assert_eq!(form.name, "Caneta azul");
    assert_eq!(form.buy_price, "1.5");
    assert_eq!(form.sell_price, "3");
    assert_eq!(form.sell_price_cash, "2.75");
    assert_eq!(form.inventory, "12");
}

#[test]
fn untouched_form_cannot_submit() {
    let form = EditForm::from_product(&product());
    assert_eq!(form.to_update(), Err(EditError::Unchanged));
    assert!(!form.can_submit());
}

#[test]
fn comma_prices_are_accepted() {
    let mut form = EditForm::from_product(&product());
    form.sell_price = "3,50".to_string();

    let update = form.to_update().unwrap();

    assert_eq!(update.sell_price, 3.5);
    assert_eq!(update.buy_price, 1.5);
    assert_eq!(update.inventory, 12);
}

#[test]
fn retyping_same_value_is_not_a_change() {
    let mut form = EditForm::from_product(&product());
    form.buy_price = "1,50".to_string();
    form.name = "  Caneta azul ".to_string();
    assert_eq!(form.to_update(), Err(EditError::Unchanged));
}

#[test]
fn padded_backend_name_is_not_a_change() {
    let mut padded = product();
    padded.name = " Caneta azul  ".to_string();

    let form = EditForm::from_product(&padded);

    assert_eq!(form.to_update(), Err(EditError::Unchanged));
    assert!(!form.can_submit());
}

#[test]
fn invalid_fields_are_rejected() {
    let mut form = EditForm::from_product(&product());
    form.name = "   ".to_string();
    assert_eq!(form.to_update(), Err(EditError::EmptyName));

    let mut form = EditForm::from_product(&product());
    form.buy_price = "-1".to_string();
    assert_eq!(form.to_update(), Err(EditError::InvalidPrice("compra")));

    let mut form = EditForm::from_product(&product());
    form.sell_price_cash = "dois".to_string();
    assert!(matches!(form.to_update(), Err(EditError::InvalidPrice(_))));

    let mut form = EditForm::from_product(&product());
    form.inventory = "2.5".to_string();
    assert_eq!(form.to_update(), Err(EditError::InvalidInventory));

    form.inventory = "-3".to_string();
    assert_eq!(form.to_update(), Err(EditError::InvalidInventory));
}

#[test]
fn inventory_change_produces_full_update() {
    let mut form = EditForm::from_product(&product());
    form.inventory = "0".to_string();

    assert_eq!(
        form.to_update().unwrap(),
        ProductUpdate {
            name: "Caneta azul".to_string(),
            buy_price: 1.5,
            sell_price: 3.0,
            sell_price_cash: 2.75,
            inventory: 0,
        }
    );
}
