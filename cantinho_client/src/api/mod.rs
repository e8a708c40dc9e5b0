//! Backend REST client.
//!
//! Every request goes through [`ApiClient::request`], which attaches the
//! persisted session token as a bearer header, and [`ApiClient::send`], which
//! turns non-success statuses into [`ApiError`]s.

mod auth;
mod products;
mod sales;

use reqwest::{Client, Method, RequestBuilder, Response};

use crate::error::{ApiError, ApiResult};
use crate::storage::{read_token, SharedStorage, Storage, TOKEN_KEY};

/// Client for the inventory backend.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) storage: SharedStorage,
}

impl ApiClient {
    /// Creates a client for `base_url` reading the bearer token from `storage`.
    pub fn new(base_url: impl Into<String>, storage: SharedStorage) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        log::info!("Creating API client for {}", base_url);
        Self {
            client: Client::new(),
            base_url,
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Builds a request to `path`, attaching the stored token if there is one.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let builder = self.client.request(method, &url);
        match read_token(self.storage.as_ref()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and checks the status code.
    ///
    /// A 401 means the stored token is no longer accepted; it is removed so
    /// the session falls back to the unauthenticated stack.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        log::debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            log::warn!("Backend rejected session token, clearing it");
            if let Err(e) = self.storage.remove(TOKEN_KEY) {
                log::error!("Failed to clear rejected token: {}", e);
            }
            return Err(ApiError::Unauthorized);
        }

        log::warn!("Request failed with status {}: {}", status, body);
        Err(ApiError::Status { status, body })
    }

    /// Sends the request and decodes a JSON body.
    pub(crate) async fn send_json<T>(&self, builder: RequestBuilder) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(builder).await?;
        let text = response.text().await?;
        log::debug!("Response body: {}", text);
        Ok(serde_json::from_str(&text)?)
    }

    /// Downloads raw bytes from an absolute URL (QR code images).
    ///
    /// The URL may live on another host and no token is sent, so a 401 here
    /// says nothing about the session and leaves the stored token alone.
    pub async fn fetch_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        log::debug!("Fetching bytes from {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Download of {} failed with status {}", url, status);
            return Err(ApiError::Status { status, body });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Path segment for a SKU, percent-encoded
pub(crate) fn sku_path(prefix: &str, sku: &str) -> String {
    format!("{}/{}", prefix, urlencoding::encode(sku))
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
