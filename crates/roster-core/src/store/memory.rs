//! In-memory record store backend.
//!
//! `HashMap<key, FieldMap>` behind a `tokio::sync::RwLock`. Point
//! operations take the lock for the duration of one map touch; the
//! prefix scan clones the matching entries out so callers never hold
//! the lock. Adequate for a single process; the trait seam is where a
//! networked backend would slot in.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{FieldMap, RecordStore, StoreResult};

/// Process-local hash-per-key store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, FieldMap>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        let mut data = self.data.write().await;
        data.entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn get_all(&self, prefix: &str) -> StoreResult<Vec<(String, FieldMap)>> {
        let data = self.data.read().await;
        Ok(data
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, fields)| (key.clone(), fields.clone()))
            .collect())
    }

    async fn get_one(&self, key: &str) -> StoreResult<FieldMap> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned().unwrap_or_default())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut data = self.data.write().await;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get_one() {
        let store = MemoryStore::new();
        store.set_field("student:1", "name", "Ann").await.unwrap();
        store.set_field("student:1", "course", "BSIT").await.unwrap();

        let fields = store.get_one("student:1").await.unwrap();
        assert_eq!(fields["name"], "Ann");
        assert_eq!(fields["course"], "BSIT");
    }

    #[tokio::test]
    async fn test_get_one_missing_is_empty_not_error() {
        let store = MemoryStore::new();
        let fields = store.get_one("student:nope").await.unwrap();
        assert!(fields.is_empty());
    }

    #[tokio::test]
    async fn test_set_field_overwrites_per_field() {
        let store = MemoryStore::new();
        store.set_field("student:1", "name", "Ann").await.unwrap();
        store.set_field("student:1", "name", "Bea").await.unwrap();

        let fields = store.get_one("student:1").await.unwrap();
        assert_eq!(fields["name"], "Bea");
        assert_eq!(fields.len(), 1);
    }

    #[tokio::test]
    async fn test_sequential_writes_to_different_fields_both_observable() {
        // Correctness floor: no field loss under sequential,
        // non-overlapping set_field calls to one key.
        let store = MemoryStore::new();
        store.set_field("student:1", "name", "Ann").await.unwrap();
        store.set_field("student:1", "email", "a@x.io").await.unwrap();

        let fields = store.get_one("student:1").await.unwrap();
        assert_eq!(fields["name"], "Ann");
        assert_eq!(fields["email"], "a@x.io");
    }

    #[tokio::test]
    async fn test_get_all_filters_by_prefix() {
        let store = MemoryStore::new();
        store.set_field("student:1", "name", "Ann").await.unwrap();
        store.set_field("student:2", "name", "Bea").await.unwrap();
        store.set_field("other:9", "name", "Zed").await.unwrap();

        let mut all = store.get_all("student:").await.unwrap();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        let keys: Vec<&str> = all.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["student:1", "student:2"]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryStore::new();
        store.delete("student:ghost").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_whole_hash() {
        let store = MemoryStore::new();
        store.set_field("student:1", "name", "Ann").await.unwrap();
        store.delete("student:1").await.unwrap();
        assert!(store.get_one("student:1").await.unwrap().is_empty());
    }
}
