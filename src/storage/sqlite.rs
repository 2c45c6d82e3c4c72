//! SQLite-backed key-value store

use super::{DatabaseManager, KeyValueStore};
use crate::core::error::Result;
use async_trait::async_trait;
use rusqlite::OptionalExtension;

/// Persistent store living in the `kv_store` table
#[derive(Clone)]
pub struct SqliteStore {
    db: DatabaseManager,
}

impl SqliteStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                Ok(conn
                    .query_row("SELECT value FROM kv_store WHERE key = ?", [&key], |row| {
                        row.get(0)
                    })
                    .optional()?)
            })
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let owned_key = key.to_string();
        let owned_value = value.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP) \
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                    [&owned_key, &owned_value],
                )?;
                Ok(())
            })
            .await?;
        tracing::debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                conn.execute("DELETE FROM kv_store WHERE key = ?", [&key])?;
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("device.db");

        {
            let store = SqliteStore::new(
                DatabaseManager::new(&path, 2, Duration::from_secs(5)).unwrap(),
            );
            store.set("kobo-reading-mode", "sepia").await.unwrap();
            store.set("kobo-reading-mode", "paper").await.unwrap();
            store.set("kobo-font-size", "20").await.unwrap();
        }

        let store =
            SqliteStore::new(DatabaseManager::new(&path, 2, Duration::from_secs(5)).unwrap());
        assert_eq!(
            store.get("kobo-reading-mode").await.unwrap().as_deref(),
            Some("paper")
        );
        assert_eq!(store.get("kobo-font-size").await.unwrap().as_deref(), Some("20"));
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let store = SqliteStore::new(DatabaseManager::new_in_memory().unwrap());
        store.remove("kobo-search-history").await.unwrap();
        assert_eq!(store.get("kobo-search-history").await.unwrap(), None);
    }
}
