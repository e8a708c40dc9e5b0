//! Sale draft: quantity, payment tier and discount for one product, plus the
//! derived prices shown before confirming.

use thiserror::Error;

use crate::formatters::parse_decimal;
use crate::models::{PriceTier, Product, SaleRequest};

pub const LOW_MARGIN_WARNING: &str = "Você está dando um desconto alto demais e não obterá lucro.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscountKind {
    #[default]
    Percentage,
    Value,
}

impl DiscountKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiscountKind::Percentage => "%",
            DiscountKind::Value => "R$",
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantidade deve ser maior que 0.")]
    BelowOne,
    #[error("Quantidade tem que ser menor que o estoque.")]
    AboveInventory,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DiscountError {
    #[error("O campo de desconto deve ser um número.")]
    NotANumber,
    #[error("O campo de desconto deve conter um valor entre 0 e 100.")]
    PercentageOutOfRange,
    #[error("O valor de desconto deve ser maior que 0.")]
    Negative,
    #[error("O valor de desconto não pode ser maior do que o valor do item.")]
    AbovePrice,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SaleError {
    #[error("Esse item foi excluido e não pode ser vendido.")]
    Deleted,
    #[error(transparent)]
    Quantity(#[from] QuantityError),
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

macro_rules! user_message {
    ($($ty:ty),*) => {
        $(impl $ty {
            /// Toast text for this error
            pub fn user_message(&self) -> String {
                self.to_string()
            }
        })*
    };
}

user_message!(QuantityError, DiscountError, SaleError);

/// Figures shown on the confirmation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleSummary {
    pub quantity: u32,
    pub unit_price: f64,
    pub discount_per_unit: f64,
    pub discounted_unit_price: f64,
    pub unit_profit: f64,
    pub total: f64,
    pub total_discounted: f64,
}

#[derive(Debug, Clone)]
pub struct SaleDraft {
    product: Product,
    quantity: u32,
    tier: PriceTier,
    kind: DiscountKind,
    discount_text: String,
    discount_error: Option<DiscountError>,
}

impl SaleDraft {
    /// Soft-deleted products cannot be sold.
    pub fn new(product: Product) -> Result<Self, SaleError> {
        if product.is_deleted() {
            return Err(SaleError::Deleted);
        }
        Ok(Self {
            product,
            quantity: 1,
            tier: PriceTier::default(),
            kind: DiscountKind::default(),
            discount_text: String::new(),
            discount_error: None,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn tier(&self) -> PriceTier {
        self.tier
    }

    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    pub fn discount_text(&self) -> &str {
        &self.discount_text
    }

    pub fn discount_error(&self) -> Option<DiscountError> {
        self.discount_error
    }

    fn available(&self) -> i64 {
        self.product.inventory.max(0)
    }

    pub fn increment(&mut self) -> Result<(), QuantityError> {
        if i64::from(self.quantity) >= self.available() {
            return Err(QuantityError::AboveInventory);
        }
        self.quantity += 1;
        Ok(())
    }

    /// Sets the quantity directly, within the same bounds as the buttons.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), QuantityError> {
        if quantity < 1 {
            return Err(QuantityError::BelowOne);
        }
        if i64::from(quantity) > self.available() {
            return Err(QuantityError::AboveInventory);
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn decrement(&mut self) -> Result<(), QuantityError> {
        if self.quantity <= 1 {
            return Err(QuantityError::BelowOne);
        }
        self.quantity -= 1;
        Ok(())
    }

    /// Switches between card and cash prices; the discount is revalidated
    /// against the new price.
    pub fn toggle_tier(&mut self) {
        self.set_tier(self.tier.toggled());
    }

    pub fn set_tier(&mut self, tier: PriceTier) {
        self.tier = tier;
        self.validate_discount();
    }

    pub fn set_kind(&mut self, kind: DiscountKind) {
        self.kind = kind;
        self.validate_discount();
    }

    /// Stores the typed discount and validates it. Blank text means no
    /// discount.
    pub fn set_discount(&mut self, text: &str) -> Result<(), DiscountError> {
        self.discount_text = text.to_string();
        self.validate_discount();
        self.discount_error.map_or(Ok(()), Err)
    }

    fn validate_discount(&mut self) {
        self.discount_error = self.parse_discount().err();
        if let Some(err) = self.discount_error {
            log::debug!("Discount '{}' rejected: {}", self.discount_text, err);
        }
    }

    /// Discount per unit in currency
    fn parse_discount(&self) -> Result<f64, DiscountError> {
        if self.discount_text.trim().is_empty() {
            return Ok(0.0);
        }
        let amount = parse_decimal(&self.discount_text).ok_or(DiscountError::NotANumber)?;
        let price = self.unit_price();
        match self.kind {
            DiscountKind::Percentage => {
                if !(0.0..=100.0).contains(&amount) {
                    return Err(DiscountError::PercentageOutOfRange);
                }
                Ok(amount / 100.0 * price)
            }
            DiscountKind::Value => {
                if amount < 0.0 {
                    Err(DiscountError::Negative)
                } else if amount > price {
                    Err(DiscountError::AbovePrice)
                } else {
                    Ok(amount)
                }
            }
        }
    }

    pub fn unit_price(&self) -> f64 {
        self.product.price(self.tier)
    }

    /// Zero while the typed discount is invalid
    pub fn discount_per_unit(&self) -> f64 {
        self.parse_discount().unwrap_or(0.0)
    }

    /// Non-blocking warning once the discount eats the whole margin
    pub fn warning(&self) -> Option<&'static str> {
        let discount = self.parse_discount().ok()?;
        let margin = self.unit_price() - self.product.buy_price;
        (discount > 0.0 && discount >= margin).then_some(LOW_MARGIN_WARNING)
    }

    pub fn summary(&self) -> SaleSummary {
        let quantity = f64::from(self.quantity);
        let unit_price = self.unit_price();
        let discount_per_unit = self.discount_per_unit();
        let discounted_unit_price = unit_price - discount_per_unit;
        SaleSummary {
            quantity: self.quantity,
            unit_price,
            discount_per_unit,
            discounted_unit_price,
            unit_profit: discounted_unit_price - self.product.buy_price,
            total: unit_price * quantity,
            total_discounted: discounted_unit_price * quantity,
        }
    }

    pub fn can_sell(&self) -> bool {
        self.sale_request().is_ok()
    }

    /// Request body for `POST /sell/{SKU}`
    pub fn sale_request(&self) -> Result<SaleRequest, SaleError> {
        if self.product.is_deleted() {
            return Err(SaleError::Deleted);
        }
        if i64::from(self.quantity) > self.available() {
            return Err(QuantityError::AboveInventory.into());
        }
        let discount = self.parse_discount()?;
        Ok(SaleRequest {
            quantity: self.quantity,
            discount,
        })
    }
}

#[cfg(test)]
#[path = "sale_tests.rs"]
mod tests;
