//! Search and filtering
//!
//! Free-text search with a persisted history of recent queries, and the
//! single-category filter used by the library screen.

pub mod engine;
pub mod filter;
pub mod history;

pub use engine::{matches, search_catalog, SearchEngine, SearchStatus};
pub use filter::CategoryFilter;
pub use history::SearchHistory;
