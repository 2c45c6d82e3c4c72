//! In-memory key-value store

use super::KeyValueStore;
use crate::core::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for hydration tests
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_overwrite_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("kobo-font-size").await.unwrap(), None);

        store.set("kobo-font-size", "16").await.unwrap();
        store.set("kobo-font-size", "18").await.unwrap();
        assert_eq!(store.get("kobo-font-size").await.unwrap().as_deref(), Some("18"));
        assert_eq!(store.len().await, 1);

        store.remove("kobo-font-size").await.unwrap();
        store.remove("kobo-font-size").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_with_entries() {
        let store = MemoryStore::with_entries([("kobo-view-mode", "list")]);
        assert_eq!(store.get("kobo-view-mode").await.unwrap().as_deref(), Some("list"));
    }
}
