//! QR label export: resolves a product's `qr_code` to PNG bytes and saves
//! it as `qr-<SKU>.png`.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::Product;

/// `<pictures>/Cantinho`, falling back to the home directory
pub fn default_label_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Cantinho")
}

pub fn label_file_name(sku: &str) -> String {
    let safe: String = sku
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("qr-{safe}.png")
}

/// Decodes a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> ApiResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ApiError::InvalidResponse("not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ApiError::InvalidResponse("data URI without payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ApiError::InvalidResponse(format!(
            "unsupported data URI encoding: {header}"
        )));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ApiError::InvalidResponse(format!("bad base64 in QR code: {e}")))
}

/// PNG bytes of the product's QR code, embedded or downloaded.
pub async fn resolve_qr(api: &ApiClient, qr_code: &str) -> ApiResult<Vec<u8>> {
    let qr_code = qr_code.trim();
    if qr_code.is_empty() {
        return Err(ApiError::InvalidResponse("product has no QR code".to_string()));
    }
    if qr_code.starts_with("data:") {
        decode_data_uri(qr_code)
    } else {
        api.fetch_bytes(qr_code).await
    }
}

pub fn save_label(dir: &Path, sku: &str, bytes: &[u8]) -> ApiResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(label_file_name(sku));
    fs::write(&path, bytes)?;
    log::info!("Saved QR label to {}", path.display());
    Ok(path)
}

/// Resolves and saves the product's label into `dir`.
pub async fn export_label(api: &ApiClient, product: &Product, dir: &Path) -> ApiResult<PathBuf> {
    let bytes = resolve_qr(api, &product.qr_code).await?;
    save_label(dir, &product.sku, &bytes)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::storage::{read_token, MemoryStorage, SharedStorage};

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

    #[test]
    fn file_name_is_filesystem_safe() {
        assert_eq!(label_file_name("CAN-01"), "qr-CAN-01.png");
        assert_eq!(label_file_name("a/b c"), "qr-a_b_c.png");
    }

    #[test]
    fn decodes_base64_data_uri() {
        let bytes = decode_data_uri("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(&bytes[..4], PNG_MAGIC);
    }

    #[test]
    fn rejects_malformed_data_uri() {
        assert!(decode_data_uri("image/png;base64,iVBORw==").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:image/png,plain").is_err());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_err());
    }

    #[tokio::test]
    async fn exports_embedded_code() {
        let dir = TempDir::new().unwrap();
        let api = ApiClient::new("http://localhost:1", Arc::new(MemoryStorage::new()));

        let path = save_label(
            dir.path(),
            "A1",
            &resolve_qr(&api, "data:image/png;base64,iVBORw==").await.unwrap(),
        )
        .unwrap();

        assert_eq!(path, dir.path().join("qr-A1.png"));
        assert_eq!(fs::read(path).unwrap(), PNG_MAGIC);
    }

    #[tokio::test]
    async fn downloads_remote_code() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/qr/A1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_MAGIC.to_vec()))
            .mount(&mock_server)
            .await;

        let api = ApiClient::new(mock_server.uri(), Arc::new(MemoryStorage::new()));
        let bytes = resolve_qr(&api, &format!("{}/qr/A1.png", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(bytes, PNG_MAGIC);
    }

    #[tokio::test]
    async fn rejected_download_keeps_session_token() {
        let backend = MockServer::start().await;
        let image_host = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/qr.png"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&image_host)
            .await;

        let storage: SharedStorage = Arc::new(MemoryStorage::with_token("tok"));
        let api = ApiClient::new(backend.uri(), storage.clone());
        let result = resolve_qr(&api, &format!("{}/qr.png", image_host.uri())).await;

        assert!(matches!(
            result,
            Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::UNAUTHORIZED
        ));
        assert_eq!(read_token(storage.as_ref()).as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn missing_code_is_an_error() {
        let api = ApiClient::new("http://localhost:1", Arc::new(MemoryStorage::new()));
        assert!(matches!(
            resolve_qr(&api, "  ").await,
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
