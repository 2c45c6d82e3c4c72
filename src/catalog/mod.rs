//! Book catalog
//!
//! Static book records, their named collections and the derived owned view.

pub mod format;
pub mod models;
pub mod seed;
pub mod store;

pub use models::{Book, CatalogSeed, Category, Collection, LibraryShelf};
pub use store::CatalogStore;
