//! Recent search queries

use crate::core::error::Result;
use serde::{Deserialize, Serialize};

/// Most-recent-first list of distinct queries, bounded by `limit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    entries: Vec<String>,
    #[serde(skip)]
    limit: usize,
}

impl SearchHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Keep the first `limit` entries of an existing list
    pub fn from_entries(mut entries: Vec<String>, limit: usize) -> Self {
        entries.truncate(limit);
        Self { entries, limit }
    }

    /// Decode the stored JSON list; anything unreadable yields an empty history
    pub fn decode(raw: &str, limit: usize) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(entries) => Self::from_entries(entries, limit),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed search history, starting empty");
                Self::new(limit)
            }
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Put `query` at the front unless it is blank or already present
    ///
    /// Presence is an exact comparison: case and surrounding whitespace
    /// matter, and an existing entry keeps its position.
    pub fn record(&mut self, query: &str) -> bool {
        if query.trim().is_empty() || self.contains(query) {
            return false;
        }
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);
        true
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.iter().any(|entry| entry == query)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
