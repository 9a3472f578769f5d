//! Key prefixing so several boards can share one backend.

use crate::error::StoreResult;
use crate::traits::StorageAdapter;
use async_trait::async_trait;
use corkboard_log::debug;
use serde_json::Value;
use std::sync::Arc;

/// A view of an adapter restricted to keys under `namespace:`.
///
/// Keys passed in and returned are unprefixed. `clear`, `keys` and `size`
/// only see this namespace.
///
/// ```
/// use corkboard_store::{MemoryStore, NamespacedStore, StorageAdapter};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let backend = Arc::new(MemoryStore::new());
/// let general = NamespacedStore::new(Arc::clone(&backend), "general");
///
/// general.set("motd", json!("Be nice")).await?;
/// assert_eq!(backend.get("general:motd").await?, Some(json!("Be nice")));
/// assert_eq!(general.keys().await?, vec!["motd"]);
/// # Ok::<(), corkboard_store::StoreError>(())
/// # }).unwrap();
/// ```
pub struct NamespacedStore<S: ?Sized> {
    store: Arc<S>,
    prefix: String,
}

impl<S: ?Sized> Clone for NamespacedStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            prefix: self.prefix.clone(),
        }
    }
}

impl<S: StorageAdapter + ?Sized> NamespacedStore<S> {
    pub fn new(store: Arc<S>, namespace: impl AsRef<str>) -> Self {
        Self {
            store,
            prefix: format!("{}:", namespace.as_ref()),
        }
    }

    /// The namespace, without the trailing separator
    pub fn namespace(&self) -> &str {
        &self.prefix[..self.prefix.len() - 1]
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl<S: StorageAdapter + ?Sized> StorageAdapter for NamespacedStore<S> {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        self.store.get(&self.key(key)).await
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.store.set(&self.key(key), value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        self.store.delete(&self.key(key)).await
    }

    async fn has(&self, key: &str) -> StoreResult<bool> {
        self.store.has(&self.key(key)).await
    }

    async fn clear(&self) -> StoreResult<()> {
        use futures::future::try_join_all;

        let keys = self.keys().await?;
        debug!(
            target: "corkboard::store",
            "clearing {} key(s) in namespace {}",
            keys.len(),
            self.namespace()
        );

        let futures = keys.iter().map(|key| self.delete(key));
        try_join_all(futures).await?;
        Ok(())
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys = self.store.keys().await?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.prefix).map(str::to_string))
            .collect())
    }

    async fn size(&self) -> StoreResult<usize> {
        Ok(self.keys().await?.len())
    }

    async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.store.incr(&self.key(key), delta).await
    }

    async fn mget(&self, keys: &[&str]) -> StoreResult<Vec<Option<Value>>> {
        let prefixed: Vec<String> = keys.iter().map(|key| self.key(key)).collect();
        let prefixed: Vec<&str> = prefixed.iter().map(String::as_str).collect();
        self.store.mget(&prefixed).await
    }

    async fn mset(&self, entries: &[(&str, Value)]) -> StoreResult<()> {
        let keys: Vec<String> = entries.iter().map(|(key, _)| self.key(key)).collect();
        let prefixed: Vec<(&str, Value)> = keys
            .iter()
            .zip(entries)
            .map(|(key, (_, value))| (key.as_str(), value.clone()))
            .collect();
        self.store.mset(&prefixed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use serde_json::json;

    fn boards() -> (Arc<MemoryStore>, NamespacedStore<MemoryStore>, NamespacedStore<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let general = NamespacedStore::new(Arc::clone(&backend), "general");
        let offtopic = NamespacedStore::new(Arc::clone(&backend), "offtopic");
        (backend, general, offtopic)
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let (backend, general, offtopic) = boards();

        general.set("post:1", json!("hello")).await.unwrap();
        offtopic.set("post:1", json!("cats")).await.unwrap();

        assert_eq!(general.get("post:1").await.unwrap(), Some(json!("hello")));
        assert_eq!(offtopic.get("post:1").await.unwrap(), Some(json!("cats")));
        assert_eq!(
            backend.keys().await.unwrap(),
            vec!["general:post:1", "offtopic:post:1"]
        );
        assert_eq!(general.namespace(), "general");
    }

    #[tokio::test]
    async fn test_clear_only_own_namespace() {
        let (backend, general, offtopic) = boards();

        general
            .mset(&[("a", json!(1)), ("b", json!(2))])
            .await
            .unwrap();
        offtopic.set("a", json!(3)).await.unwrap();

        assert_eq!(general.size().await.unwrap(), 2);
        general.clear().await.unwrap();

        assert_eq!(general.size().await.unwrap(), 0);
        assert_eq!(offtopic.keys().await.unwrap(), vec!["a"]);
        assert_eq!(backend.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_counters_and_batches() {
        let (_, general, offtopic) = boards();

        assert_eq!(general.incr("views", 2).await.unwrap(), 2);
        assert_eq!(offtopic.incr("views", 1).await.unwrap(), 1);
        assert_eq!(general.decr("views", 1).await.unwrap(), 1);

        let values = general.mget(&["views", "nothing"]).await.unwrap();
        assert_eq!(values, vec![Some(json!(1)), None]);

        assert!(general.has("views").await.unwrap());
        assert!(general.delete("views").await.unwrap());
        assert!(!general.has("views").await.unwrap());
    }
}
