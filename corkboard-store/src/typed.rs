//! Serde-typed access on top of any adapter.

use crate::error::{StoreError, StoreResult};
use crate::traits::StorageAdapter;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Reads and writes serde types as JSON values.
///
/// ```
/// use corkboard_store::{MemoryStore, TypedStore};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Post {
///     author: String,
///     body: String,
/// }
///
/// # tokio_test::block_on(async {
/// let posts = TypedStore::new(Arc::new(MemoryStore::new()));
/// let post = Post { author: "ann".into(), body: "First!".into() };
///
/// posts.set("post:1", &post).await?;
/// assert_eq!(posts.get::<Post>("post:1").await?, Some(post));
/// # Ok::<(), corkboard_store::StoreError>(())
/// # }).unwrap();
/// ```
pub struct TypedStore<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for TypedStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StorageAdapter + ?Sized> TypedStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The wrapped adapter
    pub fn inner(&self) -> &Arc<S> {
        &self.store
    }

    /// Get a typed value.
    ///
    /// A stored value that does not fit `T` is a
    /// [`StoreError::Deserialization`].
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StoreError::deserialization(key, e)),
            None => Ok(None),
        }
    }

    /// Set a typed value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value)?;
        self.store.set(key, value).await
    }

    /// Return the stored value, or build it with `factory`, store it and
    /// return it.
    pub async fn remember<T, F, Fut>(&self, key: &str, factory: F) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        if let Some(value) = self.get(key).await? {
            return Ok(value);
        }

        let value = factory().await?;
        self.set(key, &value).await?;
        Ok(value)
    }
}
