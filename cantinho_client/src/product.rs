//! Item detail: display rows derived from a fetched product snapshot.

use crate::formatters::{format_currency, format_date, format_optional_percentage};
use crate::models::{PriceTier, Product};

/// One price tier's sell price and projected profit, formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct TierSummary {
    pub tier: PriceTier,
    pub price: String,
    pub profit_percentage: String,
    pub profit_value: String,
}

impl TierSummary {
    fn of(product: &Product, tier: PriceTier) -> Self {
        let profit = product.profit(tier);
        Self {
            tier,
            price: format_currency(product.price(tier)),
            profit_percentage: format_optional_percentage(profit.percentage),
            profit_value: format_currency(profit.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub sku: String,
    pub name: String,
    /// Stock count, "-" for soft-deleted products
    pub inventory: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub buy_price: String,
    pub card: TierSummary,
    pub cash: TierSummary,
    pub deleted: bool,
}

impl ProductDetail {
    pub fn new(product: &Product) -> Self {
        let deleted = product.is_deleted();
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            inventory: if deleted {
                "-".to_string()
            } else {
                product.inventory.to_string()
            },
            created_at: format_date(&product.created_at),
            updated_at: product.updated_at.as_ref().map(format_date),
            buy_price: format_currency(product.buy_price),
            card: TierSummary::of(product, PriceTier::Card),
            cash: TierSummary::of(product, PriceTier::Cash),
            deleted,
        }
    }
}
