use chrono::{TimeZone, Utc};

use super::*;

fn product(buy: f64, card: f64, cash: f64, inventory: i64) -> Product {
    Product {
        sku: "CAN-1".to_string(),
        name: "Caneta".to_string(),
        buy_price: buy,
        sell_price: card,
        sell_price_cash: cash,
        inventory,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: None,
        deleted_at: None,
        qr_code: String::new(),
    }
}

fn draft() -> SaleDraft {
    SaleDraft::new(product(10.0, 20.0, 18.0, 3)).unwrap()
}

#[test]
fn deleted_product_cannot_be_sold() {
    let mut p = product(10.0, 20.0, 18.0, 3);
    p.deleted_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

    let err = SaleDraft::new(p).unwrap_err();

    assert_eq!(err, SaleError::Deleted);
    assert_eq!(err.user_message(), "Esse item foi excluido e não pode ser vendido.");
}

#[test]
fn defaults_are_card_tier_and_percentage() {
    let d = draft();
    assert_eq!(d.quantity(), 1);
    assert_eq!(d.tier(), PriceTier::Card);
    assert_eq!(d.kind(), DiscountKind::Percentage);
    assert_eq!(d.unit_price(), 20.0);
    assert!(d.can_sell());
}

#[test]
fn quantity_stays_between_one_and_inventory() {
    let mut d = draft();
    assert_eq!(d.decrement(), Err(QuantityError::BelowOne));
    assert_eq!(d.quantity(), 1);

    d.increment().unwrap();
    d.increment().unwrap();
    assert_eq!(d.quantity(), 3);
    assert_eq!(d.increment(), Err(QuantityError::AboveInventory));
    assert_eq!(d.quantity(), 3);

    d.decrement().unwrap();
    assert_eq!(d.quantity(), 2);
}

#[test]
fn typed_quantity_is_bounded() {
    let mut d = draft();
    assert_eq!(d.set_quantity(0), Err(QuantityError::BelowOne));
    assert_eq!(d.set_quantity(4), Err(QuantityError::AboveInventory));
    assert_eq!(d.quantity(), 1);

    d.set_quantity(3).unwrap();
    assert_eq!(d.quantity(), 3);
    assert_eq!(d.sale_request().unwrap().quantity, 3);
}

#[test]
fn out_of_stock_product_blocks_sale() {
    let mut d = SaleDraft::new(product(10.0, 20.0, 18.0, 0)).unwrap();
    assert_eq!(d.increment(), Err(QuantityError::AboveInventory));
    assert_eq!(
        d.sale_request(),
        Err(SaleError::Quantity(QuantityError::AboveInventory))
    );
}

#[test]
fn percentage_discount_is_converted_to_unit_amount() {
    let mut d = draft();
    d.increment().unwrap();
    d.set_discount("10").unwrap();

    let summary = d.summary();
    assert_eq!(summary.discount_per_unit, 2.0);
    assert_eq!(summary.discounted_unit_price, 18.0);
    assert_eq!(summary.unit_profit, 8.0);
    assert_eq!(summary.total, 40.0);
    assert_eq!(summary.total_discounted, 36.0);

    assert_eq!(
        d.sale_request().unwrap(),
        SaleRequest {
            quantity: 2,
            discount: 2.0
        }
    );
}

#[test]
fn discount_follows_active_tier() {
    let mut d = draft();
    d.set_discount("50").unwrap();
    assert_eq!(d.discount_per_unit(), 10.0);

    d.toggle_tier();

    assert_eq!(d.tier(), PriceTier::Cash);
    assert_eq!(d.discount_per_unit(), 9.0);
}

#[test]
fn value_discount_above_tier_price_is_rejected() {
    let mut d = draft();
    d.set_kind(DiscountKind::Value);
    d.set_discount("19").unwrap();

    d.set_tier(PriceTier::Cash);

    assert_eq!(d.discount_error(), Some(DiscountError::AbovePrice));
    assert!(!d.can_sell());
    assert_eq!(d.discount_per_unit(), 0.0);
}

#[test]
fn invalid_discounts_block_sale() {
    let mut d = draft();
    assert_eq!(d.set_discount("abc"), Err(DiscountError::NotANumber));
    assert!(!d.can_sell());

    assert_eq!(d.set_discount("101"), Err(DiscountError::PercentageOutOfRange));
    assert_eq!(d.set_discount("-1"), Err(DiscountError::PercentageOutOfRange));

    d.set_kind(DiscountKind::Value);
    assert_eq!(d.set_discount("-0,5"), Err(DiscountError::Negative));

    assert_eq!(d.set_discount(""), Ok(()));
    assert!(d.can_sell());
}

#[test]
fn comma_decimal_discount() {
    let mut d = draft();
    d.set_kind(DiscountKind::Value);
    d.set_discount("2,5").unwrap();
    assert_eq!(d.discount_per_unit(), 2.5);
}

#[test]
fn warning_when_discount_reaches_margin() {
    let mut d = draft();
    d.set_discount("40").unwrap();
    assert_eq!(d.warning(), None);

    d.set_discount("50").unwrap();
    assert_eq!(d.warning(), Some(LOW_MARGIN_WARNING));
    assert!(d.can_sell(), "warning does not block the sale");

    d.set_kind(DiscountKind::Value);
    d.set_discount("10").unwrap();
    assert_eq!(d.warning(), Some(LOW_MARGIN_WARNING));
}

#[test]
fn valid_percentages_never_make_price_negative() {
    for price in [0.0, 0.01, 1.0, 3.33, 19.99, 1250.0] {
        let mut d = SaleDraft::new(product(0.0, price, price, 1)).unwrap();
        for step in 0..=400u32 {
            let pct = f64::from(step) / 4.0;
            d.set_discount(&pct.to_string()).unwrap();
            assert!(
                d.summary().discounted_unit_price >= 0.0,
                "price {price} pct {pct}"
            );
        }
    }
}

#[test]
fn valid_values_never_make_price_negative() {
    for price in [0.5, 7.0, 19.99] {
        let mut d = SaleDraft::new(product(0.0, price, price, 1)).unwrap();
        d.set_kind(DiscountKind::Value);
        for step in 0..100u32 {
            let value = price * f64::from(step) / 100.0;
            d.set_discount(&value.to_string()).unwrap();
            assert!(d.summary().discounted_unit_price >= 0.0);
        }
        d.set_discount(&price.to_string()).unwrap();
        assert_eq!(d.summary().discounted_unit_price, 0.0);
        assert_eq!(
            d.set_discount(&(price + 0.01).to_string()),
            Err(DiscountError::AbovePrice)
        );
    }
}
