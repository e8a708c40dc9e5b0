//! Product edit form: text fields pre-filled from a fetched product.

use thiserror::Error;

use crate::formatters::parse_decimal;
use crate::models::{Product, ProductUpdate};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("O nome não pode ficar vazio.")]
    EmptyName,
    #[error("O campo {0} deve ser um número maior ou igual a 0.")]
    InvalidPrice(&'static str),
    #[error("O estoque deve ser um número inteiro maior ou igual a 0.")]
    InvalidInventory,
    #[error("Nenhuma alteração para salvar.")]
    Unchanged,
}

impl EditError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub name: String,
    pub buy_price: String,
    pub sell_price: String,
    pub sell_price_cash: String,
    pub inventory: String,
    original: ProductUpdate,
}

impl EditForm {
    pub fn from_product(product: &Product) -> Self {
        // Submitted names are trimmed, so compare against a trimmed original
        let original = ProductUpdate {
            name: product.name.trim().to_string(),
            buy_price: product.buy_price,
            sell_price: product.sell_price,
            sell_price_cash: product.sell_price_cash,
            inventory: product.inventory,
        };
        Self {
            name: original.name.clone(),
            buy_price: price_text(original.buy_price),
            sell_price: price_text(original.sell_price),
            sell_price_cash: price_text(original.sell_price_cash),
            inventory: original.inventory.to_string(),
            original,
        }
    }

    /// Parsed update, or the first field that fails validation
    pub fn to_update(&self) -> Result<ProductUpdate, EditError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyName);
        }
        let update = ProductUpdate {
            name: name.to_string(),
            buy_price: parse_price(&self.buy_price, "compra")?,
            sell_price: parse_price(&self.sell_price, "venda (cartão)")?,
            sell_price_cash: parse_price(&self.sell_price_cash, "venda (à vista)")?,
            inventory: self
                .inventory
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or(EditError::InvalidInventory)?,
        };
        if update == self.original {
            return Err(EditError::Unchanged);
        }
        Ok(update)
    }

    pub fn can_submit(&self) -> bool {
        self.to_update().is_ok()
    }
}

/// Shortest text that parses back to the same value
fn price_text(value: f64) -> String {
    value.to_string()
}

fn parse_price(text: &str, field: &'static str) -> Result<f64, EditError> {
    parse_decimal(text)
        .filter(|v| *v >= 0.0)
        .ok_or(EditError::InvalidPrice(field))
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
