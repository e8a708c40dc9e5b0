//! Persisted key/value storage for local client state.
//!
//! The only value the client persists is the session token, stored under
//! [`TOKEN_KEY`]. [`FileStorage`] keeps a small JSON object on disk;
//! [`MemoryStorage`] backs the tests.

use crate::error::ApiResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key of the session token
pub const TOKEN_KEY: &str = "@Cantinho:token";

/// A string key/value store shared between the API client and the session.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> ApiResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    fn remove(&self, key: &str) -> ApiResult<()>;
}

pub type SharedStorage = Arc<dyn Storage>;

/// Reads the session token, treating storage failures as "no token".
pub fn read_token(storage: &dyn Storage) -> Option<String> {
    match storage.get(TOKEN_KEY) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            log::warn!("Failed to read session token: {}", e);
            None
        }
    }
}

/// JSON file backed storage
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the map from disk, or an empty map if the file doesn't exist or is corrupt
    fn load(&self) -> HashMap<String, String> {
        if !self.path.exists() {
            return HashMap::new();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!(
                        "Failed to parse storage file {}, starting fresh: {}",
                        self.path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) => {
                log::warn!(
                    "Failed to read storage file {}, starting fresh: {}",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
        }
    }

    fn save(&self, map: &HashMap<String, String>) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, content)?;
        log::debug!("Saved storage with {} keys to {}", map.len(), self.path.display());
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let _guard = self.guard();
        Ok(self.load().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let _guard = self.guard();
        let mut map = self.load();
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        let _guard = self.guard();
        let mut map = self.load();
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

/// In-memory storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let storage = Self::default();
        storage
            .values()
            .insert(TOKEN_KEY.to_string(), token.to_string());
        storage
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        self.values().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
