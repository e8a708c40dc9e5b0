//! Product endpoints.

use reqwest::Method;

use crate::error::ApiResult;
use crate::models::{Product, ProductListResponse, ProductQuery, ProductResponse, ProductUpdate};

use super::{sku_path, ApiClient};

impl ApiClient {
    /// Fetches one page of products matching the query.
    pub async fn list_products(&self, query: &ProductQuery) -> ApiResult<Vec<Product>> {
        log::debug!(
            "Listing products: search='{}' page={} step={}",
            query.search,
            query.page,
            query.step
        );
        let builder = self
            .request(Method::GET, "/products")
            .query(&query.to_pairs());
        let response: ProductListResponse = self.send_json(builder).await?;
        log::info!(
            "Fetched {} products (page {})",
            response.products.len(),
            query.page
        );
        Ok(response.products)
    }

    /// Fetches a single product by SKU.
    pub async fn get_product(&self, sku: &str) -> ApiResult<Product> {
        let builder = self.request(Method::GET, &sku_path("/product", sku));
        let response: ProductResponse = self.send_json(builder).await?;
        Ok(response.product)
    }

    pub async fn update_product(&self, sku: &str, update: &ProductUpdate) -> ApiResult<()> {
        log::info!("Updating product {}", sku);
        let builder = self
            .request(Method::PUT, &sku_path("/product", sku))
            .json(update);
        self.send(builder).await?;
        Ok(())
    }

    /// Soft-deletes a product; the backend sets its deletion timestamp.
    pub async fn delete_product(&self, sku: &str) -> ApiResult<()> {
        log::info!("Deleting product {}", sku);
        let builder = self.request(Method::DELETE, &sku_path("/product", sku));
        self.send(builder).await?;
        Ok(())
    }

    /// Clears the deletion timestamp of a soft-deleted product.
    pub async fn reactivate_product(&self, sku: &str) -> ApiResult<()> {
        log::info!("Reactivating product {}", sku);
        let builder = self.request(Method::POST, &sku_path("/product", sku));
        self.send(builder).await?;
        Ok(())
    }
}
