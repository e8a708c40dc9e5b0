//! Tests for the key/value storage backends.

use super::*;
use tempfile::TempDir;

#[test]
fn file_storage_missing_file_reads_none() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path().join("session.json"));
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn file_storage_set_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cantinho").join("session.json");
    let storage = FileStorage::new(&path);

    storage.set(TOKEN_KEY, "abc123").unwrap();

    assert!(path.exists());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some("abc123".to_string()));
}

#[test]
fn file_storage_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    FileStorage::new(&path).set(TOKEN_KEY, "persisted").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), Some("persisted".to_string()));
}

#[test]
fn file_storage_writes_token_under_fixed_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    FileStorage::new(&path).set(TOKEN_KEY, "tok").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["@Cantinho:token"], "tok");
}

#[test]
fn file_storage_remove_keeps_other_keys() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path().join("session.json"));
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set("other", "value").unwrap();

    storage.remove(TOKEN_KEY).unwrap();

    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get("other").unwrap(), Some("value".to_string()));
}

#[test]
fn file_storage_remove_missing_key_is_noop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let storage = FileStorage::new(&path);

    storage.remove(TOKEN_KEY).unwrap();
    assert!(!path.exists());
}

#[test]
fn file_storage_corrupt_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let storage = FileStorage::new(&path);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

    storage.set(TOKEN_KEY, "fresh").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some("fresh".to_string()));
}

#[test]
fn memory_storage_roundtrip() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

    storage.set(TOKEN_KEY, "tok").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some("tok".to_string()));

    storage.remove(TOKEN_KEY).unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn read_token_ignores_empty_value() {
    let storage = MemoryStorage::with_token("");
    assert_eq!(read_token(&storage), None);

    let storage = MemoryStorage::with_token("abc");
    assert_eq!(read_token(&storage), Some("abc".to_string()));
}
