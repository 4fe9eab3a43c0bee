//! In-memory key-value storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pizzadash_core::auth::{KeyValueStore, Result};

/// In-memory store for development and testing.
///
/// Entries live in a `HashMap` behind `Arc<RwLock<_>>`, so clones share
/// state. Nothing is persisted when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().await;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set_item("user", r#"{"id":"1"}"#).await.unwrap();

        let value = store.get_item("user").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get_item("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set_item("k", "a").await.unwrap();
        store.set_item("k", "b").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove_item("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.set_item("k", "v").await.unwrap();
        assert_eq!(clone.get_item("k").await.unwrap().as_deref(), Some("v"));

        clone.remove_item("k").await.unwrap();
        assert!(store.is_empty().await);
    }
}
