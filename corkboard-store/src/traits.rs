//! Storage adapter trait definition.

use crate::error::StoreResult;
use async_trait::async_trait;
use serde_json::Value;

/// Asynchronous key-value contract the board depends on for persistence.
///
/// Values are JSON documents. Implementations decide where they live; the
/// methods are async so that network or disk backed stores can suspend.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Get a value.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Delete a key.
    ///
    /// Returns `true` if the key was present.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Check if a key exists.
    async fn has(&self, key: &str) -> StoreResult<bool>;

    /// Remove every key.
    async fn clear(&self) -> StoreResult<()>;

    /// All keys currently stored.
    async fn keys(&self) -> StoreResult<Vec<String>>;

    /// Number of keys currently stored.
    async fn size(&self) -> StoreResult<usize>;

    /// Add `delta` to an integer value and return the result.
    ///
    /// An absent key is created with the value `delta`. Backends shared by
    /// several writers must make this read-modify-write atomic.
    async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64>;

    /// [`incr`](Self::incr) by one, e.g. for post sequence numbers.
    async fn incr_one(&self, key: &str) -> StoreResult<i64> {
        self.incr(key, 1).await
    }

    /// Subtract `delta` from an integer value. See [`incr`](Self::incr).
    async fn decr(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.incr(key, delta.saturating_neg()).await
    }

    /// Get multiple keys concurrently.
    ///
    /// Returns one entry per requested key, in the same order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use corkboard_store::*;
    /// # use serde_json::json;
    /// # tokio_test::block_on(async {
    /// let store = MemoryStore::new();
    /// store.set("thread:1:title", json!("Welcome")).await?;
    ///
    /// let values = store.mget(&["thread:1:title", "thread:2:title"]).await?;
    /// assert_eq!(values, vec![Some(json!("Welcome")), None]);
    /// # Ok::<(), StoreError>(())
    /// # }).unwrap();
    /// ```
    async fn mget(&self, keys: &[&str]) -> StoreResult<Vec<Option<Value>>> {
        use futures::future::try_join_all;

        let futures = keys.iter().map(|key| self.get(key));
        try_join_all(futures).await
    }

    /// Set multiple key-value pairs concurrently.
    async fn mset(&self, entries: &[(&str, Value)]) -> StoreResult<()> {
        use futures::future::try_join_all;

        let futures = entries
            .iter()
            .map(|(key, value)| self.set(key, value.clone()));

        try_join_all(futures).await?;
        Ok(())
    }
}
