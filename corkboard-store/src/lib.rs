//! Key-value storage for Corkboard.
//!
//! Boards persist posts, counters and user records through the
//! [`StorageAdapter`] contract. This crate defines that contract and ships a
//! process-local implementation plus two wrappers that work over any adapter.
//!
//! - [`MemoryStore`] - `HashMap` behind a `tokio` `RwLock`
//! - [`TypedStore`] - get/set serde types as JSON
//! - [`NamespacedStore`] - `namespace:key` prefixing for shared backends
//!
//! # Examples
//!
//! ```
//! use corkboard_store::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StoreError> {
//!     let store = MemoryStore::new();
//!
//!     store.set("thread:7", json!({"title": "Introductions"})).await?;
//!     store.incr("thread:7:views", 1).await?;
//!
//!     assert!(store.has("thread:7").await?);
//!     assert_eq!(store.size().await?, 2);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod namespaced;
pub mod traits;
pub mod typed;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use namespaced::NamespacedStore;
pub use traits::StorageAdapter;
pub use typed::TypedStore;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::memory::MemoryStore;
    pub use crate::namespaced::NamespacedStore;
    pub use crate::traits::StorageAdapter;
    pub use crate::typed::TypedStore;
}
