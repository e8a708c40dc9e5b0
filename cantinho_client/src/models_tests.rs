//! Tests for product deserialisation and profit projection.

use super::*;

fn product_json() -> serde_json::Value {
    serde_json::json!({
        "_id": "64b0c0ffee",
        "SKU": "7891000100103",
        "user_SKU": "u1-7891000100103",
        "name": "Café 500g",
        "buy_price": 10,
        "sell_price": 15,
        "sell_price_cash": 14.5,
        "inventory": 12,
        "created_at": "2023-03-10T14:00:00.000Z",
        "updated_at": null,
        "deleted_at": null,
        "qr_code": "data:image/png;base64,iVBORw0KGgo=",
        "__v": 0,
        "states": []
    })
}

#[test]
fn deserializes_backend_product_ignoring_extra_fields() {
    let product: Product = serde_json::from_value(product_json()).unwrap();

    assert_eq!(product.sku, "7891000100103");
    assert_eq!(product.name, "Café 500g");
    assert_eq!(product.buy_price, 10.0);
    assert_eq!(product.sell_price, 15.0);
    assert_eq!(product.sell_price_cash, 14.5);
    assert_eq!(product.inventory, 12);
    assert!(product.updated_at.is_none());
    assert!(!product.is_deleted());
}

#[test]
fn accepts_prices_sent_as_strings() {
    let mut json = product_json();
    json["buy_price"] = serde_json::json!("10.50");
    json["sell_price"] = serde_json::json!("15,75");

    let product: Product = serde_json::from_value(json).unwrap();
    assert!((product.buy_price - 10.5).abs() < 1e-9);
    assert!((product.sell_price - 15.75).abs() < 1e-9);
}

#[test]
fn rejects_non_numeric_price_string() {
    let mut json = product_json();
    json["buy_price"] = serde_json::json!("dez");

    assert!(serde_json::from_value::<Product>(json).is_err());
}

#[test]
fn deleted_at_marks_soft_delete() {
    let mut json = product_json();
    json["deleted_at"] = serde_json::json!("2023-04-01T09:00:00Z");

    let product: Product = serde_json::from_value(json).unwrap();
    assert!(product.is_deleted());
}

#[test]
fn profit_of_ten_to_fifteen_is_fifty_percent() {
    let profit = Profit::between(10.0, 15.0);
    assert!((profit.value - 5.0).abs() < 1e-9);
    assert!((profit.percentage.unwrap() - 50.0).abs() < 1e-9);
}

#[test]
fn profit_percentage_undefined_for_zero_buy_price() {
    let profit = Profit::between(0.0, 15.0);
    assert_eq!(profit.value, 15.0);
    assert!(profit.percentage.is_none());
}

#[test]
fn product_profit_uses_tier_price() {
    let product: Product = serde_json::from_value(product_json()).unwrap();

    assert!((product.profit(PriceTier::Card).value - 5.0).abs() < 1e-9);
    assert!((product.profit(PriceTier::Cash).value - 4.5).abs() < 1e-9);
    assert!((product.profit(PriceTier::Cash).percentage.unwrap() - 45.0).abs() < 1e-9);
}

#[test]
fn price_tier_toggle() {
    assert_eq!(PriceTier::default(), PriceTier::Card);
    assert_eq!(PriceTier::Card.toggled(), PriceTier::Cash);
    assert_eq!(PriceTier::Cash.toggled(), PriceTier::Card);
}

#[test]
fn query_pairs_in_backend_order() {
    let query = ProductQuery {
        search: "café".to_string(),
        page: 2,
        step: 20,
        with_deleted: false,
    };

    assert_eq!(
        query.to_pairs(),
        vec![
            ("search", "café".to_string()),
            ("page", "2".to_string()),
            ("step", "20".to_string()),
            ("with_deleted", "false".to_string()),
        ]
    );
}

#[test]
fn auth_response_tolerates_missing_token() {
    let response: AuthResponse =
        serde_json::from_str(r#"{"message": "Usuário criado"}"#).unwrap();
    assert!(response.token.is_none());
    assert_eq!(response.message.as_deref(), Some("Usuário criado"));
}
