//! Device-local key-value storage
//!
//! Everything the app remembers between launches (reading preferences and
//! search history) goes through the [`KeyValueStore`] port. Two adapters are
//! provided:
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`SqliteStore`] backed by a pooled SQLite database

pub mod database;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use database::DatabaseManager;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::core::error::Result;
use async_trait::async_trait;

/// Well-known storage keys
pub mod keys {
    pub const READING_MODE: &str = "kobo-reading-mode";
    pub const FONT_SIZE: &str = "kobo-font-size";
    pub const FONT_FAMILY: &str = "kobo-font-family";
    pub const VIEW_MODE: &str = "kobo-view-mode";
    pub const DARK_MODE: &str = "kobo-dark-mode";
    pub const SEARCH_HISTORY: &str = "kobo-search-history";

    pub const ALL: [&str; 6] = [
        READING_MODE,
        FONT_SIZE,
        FONT_FAMILY,
        VIEW_MODE,
        DARK_MODE,
        SEARCH_HISTORY,
    ];
}

/// String-to-string persistence port
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
