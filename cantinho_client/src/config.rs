//! Runtime configuration read from the environment.

use std::path::PathBuf;

/// Default backend used when no URL is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Products fetched per page by the inventory list
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub page_size: u32,
    pub storage_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            storage_path: default_storage_path(),
        }
    }
}

impl Config {
    /// Builds the configuration from process environment variables.
    ///
    /// - `CANTINHO_API_URL` (falls back to `API_URL`)
    /// - `CANTINHO_PAGE_SIZE`
    /// - `CANTINHO_STORAGE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CANTINHO_API_URL")
            .or_else(|| lookup("API_URL"))
            .filter(|url| !url.trim().is_empty())
        {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("CANTINHO_PAGE_SIZE") {
            match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => log::warn!("Ignoring invalid CANTINHO_PAGE_SIZE: '{}'", raw),
            }
        }

        if let Some(path) = lookup("CANTINHO_STORAGE").filter(|p| !p.trim().is_empty()) {
            config.storage_path = PathBuf::from(path);
        }

        log::debug!("Loaded configuration: {:?}", config);
        config
    }
}

/// Returns the default session file: ~/.local/share/cantinho/session.json
pub fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantinho")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, 20);
        assert!(config.storage_path.ends_with("cantinho/session.json"));
    }

    #[test]
    fn prefers_prefixed_api_url() {
        let config = Config::from_lookup(lookup_from(&[
            ("CANTINHO_API_URL", "https://api.example.com/"),
            ("API_URL", "https://other.example.com"),
        ]));
        assert_eq!(config.api_url, "https://api.example.com");
    }

    #[test]
    fn falls_back_to_plain_api_url() {
        let config = Config::from_lookup(lookup_from(&[("API_URL", "https://other.example.com")]));
        assert_eq!(config.api_url, "https://other.example.com");
    }

    #[test]
    fn invalid_page_size_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("CANTINHO_PAGE_SIZE", "zero")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let config = Config::from_lookup(lookup_from(&[("CANTINHO_PAGE_SIZE", "0")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let config = Config::from_lookup(lookup_from(&[("CANTINHO_PAGE_SIZE", "50")]));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn storage_override() {
        let config = Config::from_lookup(lookup_from(&[("CANTINHO_STORAGE", "/tmp/s.json")]));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/s.json"));
    }
}
