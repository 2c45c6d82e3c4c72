//! Shelf Reader Library
//!
//! This library provides the core of an e-book storefront and reader,
//! including the book catalog, reading preferences, search, pagination and
//! the screen models that drive them.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod preferences;
pub mod reader;
pub mod search;
pub mod storage;

// Re-export commonly used types
pub use app::{App, Route};
pub use catalog::{Book, CatalogStore};
pub use crate::core::{Config, NotificationBus, ShelfError};
pub use preferences::{PreferenceState, Preferences};
pub use reader::ReaderSession;
pub use search::SearchEngine;
pub use storage::KeyValueStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the library
pub type Result<T> = anyhow::Result<T>;
