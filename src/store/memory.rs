// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

// Layer 3: Internal module imports
use super::traits::Store;
use crate::error::AppError;

/// In-memory [`Store`] backed by a `DashMap`. Per-key atomicity comes
/// from `DashMap::get_mut` rather than a single global lock — no
/// in-process locks beyond the store's own primitive (§5).
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Value, AppError> {
        self.inner
            .get(key)
            .map(|r| r.clone())
            .ok_or_else(|| AppError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, record: Value) {
        self.inner.insert(key.to_string(), record);
    }

    async fn update(&self, key: &str, field: &str, value: Value) -> Result<(), AppError> {
        let mut entry = self
            .inner
            .get_mut(key)
            .ok_or_else(|| AppError::NotFound(key.to_string()))?;
        match entry.value_mut() {
            Value::Object(map) => {
                map.insert(field.to_string(), value);
                Ok(())
            }
            _ => Err(AppError::Internal(format!(
                "record at {key} is not an object; cannot update field {field}"
            ))),
        }
    }

    async fn delete(&self, key: &str) {
        self.inner.remove(key);
    }

    async fn items(&self) -> Vec<(String, Value)> {
        self.inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get("nope").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("k", json!({"a": 1})).await;
        assert_eq!(store.get("k").await.unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn update_sets_single_field_without_clobbering_others() {
        let store = MemoryStore::new();
        store.set("k", json!({"a": 1, "b": 2})).await;
        store.update("k", "a", json!(99)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), json!({"a": 99, "b": 2}));
    }

    #[tokio::test]
    async fn update_missing_key_is_not_found() {
        let store = MemoryStore::new();
        assert!(store.update("nope", "a", json!(1)).await.is_err());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        store.delete("nope").await;
        store.set("k", json!({})).await;
        store.delete("k").await;
        store.delete("k").await;
        assert!(store.get("k").await.is_err());
    }

    #[tokio::test]
    async fn items_enumerates_all_entries() {
        let store = MemoryStore::new();
        store.set("a", json!(1)).await;
        store.set("b", json!(2)).await;
        let mut items = store.items().await;
        items.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]);
    }

    #[tokio::test]
    async fn concurrent_updates_to_distinct_fields_both_land() {
        let store = Arc::new(MemoryStore::new());
        store.set("k", json!({"a": 0, "b": 0})).await;
        let s1 = store.clone();
        let s2 = store.clone();
        let (r1, r2) = tokio::join!(
            s1.update("k", "a", json!(1)),
            s2.update("k", "b", json!(2)),
        );
        r1.unwrap();
        r2.unwrap();
        let record = store.get("k").await.unwrap();
        assert_eq!(record["a"], 1);
        assert_eq!(record["b"], 2);
    }
}
