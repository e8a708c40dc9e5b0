//! Unit tests for the backend client.


use std::sync::Arc;

use crate::api::ApiClient;
use crate::storage::{MemoryStorage, SharedStorage};

/// Client pointed at a mock server with an optional stored token.
pub(super) fn api_with_mock(mock_uri: &str, token: Option<&str>) -> (ApiClient, SharedStorage) {
    let storage: SharedStorage = match token {
        Some(token) => Arc::new(MemoryStorage::with_token(token)),
        None => Arc::new(MemoryStorage::new()),
    };
    (ApiClient::new(mock_uri, storage.clone()), storage)
}

pub(super) fn product_body(sku: &str, inventory: i64) -> serde_json::Value {
    serde_json::json!({
        "SKU": sku,
        "name": format!("Produto {sku}"),
        "buy_price": 10.0,
        "sell_price": 15.0,
        "sell_price_cash": 14.0,
        "inventory": inventory,
        "created_at": "2023-03-10T14:00:00.000Z",
        "updated_at": null,
        "deleted_at": null,
        "qr_code": "https://qr.example.com/code.png"
    })
}
