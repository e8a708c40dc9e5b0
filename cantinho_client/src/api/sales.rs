//! Sale submission.

use reqwest::Method;

use crate::error::ApiResult;
use crate::models::SaleRequest;

use super::{sku_path, ApiClient};

impl ApiClient {
    /// Records a sale; the backend decrements the stock.
    ///
    /// Sent once. Nothing is retried and there is no idempotency key, so a
    /// network failure after the backend committed leaves the caller unaware.
    pub async fn sell(&self, sku: &str, sale: &SaleRequest) -> ApiResult<()> {
        log::info!(
            "Selling {} x {} (discount {:.2} per unit)",
            sale.quantity,
            sku,
            sale.discount
        );
        let builder = self.request(Method::POST, &sku_path("/sell", sku)).json(sale);
        self.send(builder).await?;
        Ok(())
    }
}
