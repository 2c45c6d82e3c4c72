//! Library category filter

use crate::catalog::{Book, CatalogStore};

/// At most one selected category; selecting it again clears the filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: Option<String>,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `category_id`, or clear the filter if it is already selected
    pub fn toggle(&mut self, category_id: &str) -> Option<&str> {
        if self.selected.as_deref() == Some(category_id) {
            self.selected = None;
        } else {
            self.selected = Some(category_id.to_string());
        }
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Books having a tag that contains the selected category's name
    ///
    /// With nothing selected every book passes; an id the catalog does not
    /// know matches nothing.
    pub fn apply<'a>(&self, books: &'a [Book], catalog: &CatalogStore) -> Vec<&'a Book> {
        let Some(id) = self.selected.as_deref() else {
            return books.iter().collect();
        };
        let Some(category) = catalog.category(id) else {
            tracing::debug!(category = id, "Unknown category selected");
            return Vec::new();
        };

        let name = category.name.to_lowercase();
        books
            .iter()
            .filter(|book| {
                book.categories
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&name))
            })
            .collect()
    }
}
