//! Integration tests for corkboard-store

use corkboard_store::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Post {
    id: u64,
    author: String,
    body: String,
}

/// Exercises the whole contract against any adapter.
async fn exercise_contract(store: &dyn StorageAdapter) {
    store.clear().await.unwrap();
    assert_eq!(store.size().await.unwrap(), 0);

    store.set("a", json!("alpha")).await.unwrap();
    store.set("a", json!("again")).await.unwrap();
    assert_eq!(store.get("a").await.unwrap(), Some(json!("again")));
    assert_eq!(store.size().await.unwrap(), 1);

    store
        .mset(&[("b", json!([1, 2])), ("c", json!({"k": null}))])
        .await
        .unwrap();
    assert_eq!(
        store.mget(&["c", "a", "zz"]).await.unwrap(),
        vec![Some(json!({"k": null})), Some(json!("again")), None]
    );

    let mut keys = store.keys().await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["a", "b", "c"]);

    assert_eq!(store.incr("n", 1).await.unwrap(), 1);
    assert_eq!(store.incr_one("n").await.unwrap(), 2);
    assert_eq!(store.decr("n", 5).await.unwrap(), -3);

    assert!(store.delete("a").await.unwrap());
    assert!(!store.delete("a").await.unwrap());
    assert!(!store.has("a").await.unwrap());

    store.clear().await.unwrap();
    assert!(store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_store_contract() {
    exercise_contract(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_namespaced_store_contract() {
    let backend = Arc::new(MemoryStore::new());
    backend.set("other:keep", json!(1)).await.unwrap();

    let board = NamespacedStore::new(Arc::clone(&backend), "board");
    exercise_contract(&board).await;

    assert_eq!(backend.keys().await.unwrap(), vec!["other:keep"]);
}

#[tokio::test]
async fn test_typed_posts_in_namespace() {
    let backend = Arc::new(MemoryStore::new());
    let posts = TypedStore::new(Arc::new(NamespacedStore::new(backend.clone(), "posts")));

    let post = Post {
        id: 1,
        author: "ann".to_string(),
        body: "Hello &amp; welcome".to_string(),
    };
    posts.set("1", &post).await.unwrap();

    assert_eq!(posts.get::<Post>("1").await.unwrap(), Some(post));
    assert!(backend.has("posts:1").await.unwrap());

    let count = posts.inner().incr("count", 1).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_shared_adapter_across_tasks() {
    let store: Arc<dyn StorageAdapter> = Arc::new(MemoryStore::new());

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.set(&format!("post:{}", i), json!(i)).await.unwrap();
            store.incr("posts", 1).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.get("posts").await.unwrap(), Some(json!(10)));
    assert_eq!(store.size().await.unwrap(), 11);
}

#[test]
fn test_store_error_display() {
    let err = StoreError::Connection("refused".to_string());
    assert!(err.to_string().contains("refused"));
    assert_eq!(StoreError::Timeout.to_string(), "Operation timeout");
}

#[test]
fn test_blocking_usage() {
    let store = MemoryStore::new();
    tokio_test::block_on(async {
        store.set("k", json!("v")).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!("v")));
    });
}
