//! Process-local store.

use crate::error::StoreResult;
use crate::traits::StorageAdapter;
use async_trait::async_trait;
use corkboard_log::trace;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory [`StorageAdapter`].
///
/// Clones share the same map. Nothing survives the process; use it for
/// tests, development and single-node boards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with entries
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let data = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }
}

#[async_trait]
impl StorageAdapter for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        trace!(target: "corkboard::store", "set {}", key);
        self.data.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        trace!(target: "corkboard::store", "delete {}", key);
        Ok(self.data.write().await.remove(key).is_some())
    }

    async fn has(&self, key: &str) -> StoreResult<bool> {
        Ok(self.data.read().await.contains_key(key))
    }

    async fn clear(&self) -> StoreResult<()> {
        let mut data = self.data.write().await;
        trace!(target: "corkboard::store", "clear {} key(s)", data.len());
        data.clear();
        Ok(())
    }

    /// Keys in lexicographic order.
    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.data.read().await.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }

    async fn size(&self) -> StoreResult<usize> {
        Ok(self.data.read().await.len())
    }

    /// Integer values are adjusted in place; any other stored value counts as
    /// zero and is overwritten. Saturates at the `i64` bounds.
    async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64> {
        let mut data = self.data.write().await;
        let entry = data.entry(key.to_string()).or_insert(Value::from(0));

        let current = entry.as_i64().unwrap_or(0);
        let new_value = current.saturating_add(delta);
        *entry = Value::from(new_value);

        trace!(target: "corkboard::store", "incr {} by {} -> {}", key, delta, new_value);
        Ok(new_value)
    }

    // one lock for the whole batch, so readers never see a partial mset

    async fn mget(&self, keys: &[&str]) -> StoreResult<Vec<Option<Value>>> {
        let data = self.data.read().await;
        Ok(keys.iter().map(|key| data.get(*key).cloned()).collect())
    }

    async fn mset(&self, entries: &[(&str, Value)]) -> StoreResult<()> {
        let mut data = self.data.write().await;
        for (key, value) in entries {
            data.insert(key.to_string(), value.clone());
        }
        trace!(target: "corkboard::store", "mset {} key(s)", entries.len());
        Ok(())
    }
}
