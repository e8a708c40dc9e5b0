//! Wire types exchanged with the backend and the product snapshot model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Payment method, which selects the price tier used for a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceTier {
    /// Card payment, possibly in instalments ("cartão")
    #[default]
    Card,
    /// Cash payment ("à vista")
    Cash,
}

impl PriceTier {
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Card => "Cartão",
            PriceTier::Cash => "À vista",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PriceTier::Card => PriceTier::Cash,
            PriceTier::Cash => PriceTier::Card,
        }
    }
}

/// Product snapshot as returned by the backend.
///
/// The backend owns this record; the client only ever holds read-mostly
/// copies that are re-fetched whenever a screen regains focus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub buy_price: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub sell_price: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub sell_price_cash: f64,
    #[serde(default)]
    pub inventory: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub qr_code: String,
}

impl Product {
    /// Soft-deleted products carry a deletion timestamp
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn price(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Card => self.sell_price,
            PriceTier::Cash => self.sell_price_cash,
        }
    }

    /// Projected profit per unit when sold at the given tier without discount
    pub fn profit(&self, tier: PriceTier) -> Profit {
        Profit::between(self.buy_price, self.price(tier))
    }
}

/// Profit of selling one unit bought at `buy` for `sell`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profit {
    pub value: f64,
    /// Margin relative to the buy price; undefined for free items
    pub percentage: Option<f64>,
}

impl Profit {
    pub fn between(buy: f64, sell: f64) -> Self {
        let value = sell - buy;
        let percentage = if buy > 0.0 {
            Some(value * 100.0 / buy)
        } else {
            None
        };
        Self { value, percentage }
    }
}

/// Accepts prices sent either as JSON numbers or numeric strings
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(serde::de::Error::custom),
    }
}

/// `GET /products` response body
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// `GET /product/{SKU}` response body
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Query of one inventory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: String,
    pub page: u32,
    pub step: u32,
    pub with_deleted: bool,
}

impl ProductQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search", self.search.clone()),
            ("page", self.page.to_string()),
            ("step", self.step.to_string()),
            ("with_deleted", self.with_deleted.to_string()),
        ]
    }
}

/// `PUT /product/{SKU}` request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub buy_price: f64,
    pub sell_price: f64,
    pub sell_price_cash: f64,
    pub inventory: i64,
}

/// `POST /sell/{SKU}` request body; `discount` is the per-unit amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRequest {
    pub quantity: u32,
    pub discount: f64,
}

/// Credentials for `POST /auth/signin` and `POST /users`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub phone: String,
    pub password: String,
}

/// `POST /auth/verify` request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyRequest {
    pub phone: String,
    pub verification_token: String,
}

/// Body returned by the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
