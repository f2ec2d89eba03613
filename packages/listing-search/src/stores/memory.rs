//! In-memory stage result store for testing and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::ResultStore;

/// In-memory stage result store.
///
/// Useful for testing and single-process runs. Data is lost on
/// restart, which is acceptable for run-scoped stage results.
pub struct MemoryStore {
    values: RwLock<HashMap<Uuid, Value>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.read().unwrap().is_empty()
    }

    /// Clear all stored values.
    pub fn clear(&self) {
        self.values.write().unwrap().clear();
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn put(&self, value: &Value) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.values.write().unwrap().insert(id, value.clone());
        Ok(id)
    }

    async fn put_with_id(&self, id: Uuid, value: &Value) -> Result<()> {
        self.values.write().unwrap().insert(id, value.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Value>> {
        Ok(self.values.read().unwrap().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryStore::new();
        let value = json!({"listings": [{"url": "https://example.com/rooms/1", "score": 4}]});

        let id = store.put(&value).await.unwrap();
        let read_back = store.get(id).await.unwrap().unwrap();

        assert_eq!(read_back, value);
    }

    #[tokio::test]
    async fn put_generates_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.put(&json!(1)).await.unwrap();
        let b = store.put(&json!(2)).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn caller_supplied_id_is_honored() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.put_with_id(id, &json!({"final": true})).await.unwrap();

        assert_eq!(store.get(id).await.unwrap().unwrap(), json!({"final": true}));
    }

    #[tokio::test]
    async fn get_required_fails_on_missing_id() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();

        let err = store.get_required(missing).await.unwrap_err();
        assert!(matches!(err, SearchError::MissingStageResult { id } if id == missing));
    }
}
