//! Authentication endpoints.

use reqwest::Method;

use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, Credentials, VerifyRequest};

use super::ApiClient;

impl ApiClient {
    /// `POST /auth/signin`, returning the issued session token.
    pub async fn sign_in(&self, credentials: &Credentials) -> ApiResult<String> {
        log::info!("Signing in phone ending in {}", phone_suffix(&credentials.phone));
        let builder = self.request(Method::POST, "/auth/signin").json(credentials);
        let response: AuthResponse = self.send_json(builder).await?;
        extract_token(response)
    }

    /// `POST /users`, registering a phone that still has to be verified.
    pub async fn sign_up(&self, credentials: &Credentials) -> ApiResult<()> {
        log::info!("Signing up phone ending in {}", phone_suffix(&credentials.phone));
        let builder = self.request(Method::POST, "/users").json(credentials);
        self.send(builder).await?;
        Ok(())
    }

    /// `POST /auth/verify`, exchanging the SMS code for a session token.
    pub async fn verify_token(&self, request: &VerifyRequest) -> ApiResult<String> {
        log::info!("Verifying token for phone ending in {}", phone_suffix(&request.phone));
        let builder = self.request(Method::POST, "/auth/verify").json(request);
        let response: AuthResponse = self.send_json(builder).await?;
        extract_token(response)
    }
}

fn extract_token(response: AuthResponse) -> ApiResult<String> {
    match response.token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::InvalidResponse(
            response
                .message
                .unwrap_or_else(|| "missing token in auth response".to_string()),
        )),
    }
}

/// Last digits of a phone number, for logs
fn phone_suffix(phone: &str) -> &str {
    let start = phone.len().saturating_sub(4);
    phone.get(start..).unwrap_or(phone)
}
