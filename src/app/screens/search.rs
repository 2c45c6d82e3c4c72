//! Search screen

use crate::app::App;
use crate::catalog::{Book, Category};
use crate::core::error::{Result, ShelfError};
use crate::search::SearchStatus;

/// Query box, recent searches, category shortcuts and trending terms
pub struct SearchScreen<'a> {
    app: &'a App,
    query: String,
}

impl<'a> SearchScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the text box without searching
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Search for the current text
    pub async fn submit(&mut self) -> Vec<Book> {
        let query = self.query.clone();
        self.app.search().search(&query).await
    }

    /// Fill the text box with `query` and search for it
    pub async fn search_for(&mut self, query: &str) -> Vec<Book> {
        self.query = query.to_string();
        self.submit().await
    }

    /// Tap on a recent search entry
    pub async fn tap_history(&mut self, index: usize) -> Result<Vec<Book>> {
        let history = self.app.search().history().await;
        let query = history
            .get(index)
            .ok_or_else(|| ShelfError::NotFound(format!("history entry {}", index)))?
            .clone();
        Ok(self.search_for(&query).await)
    }

    /// Tap on a category tile; searches for the category's name
    pub async fn tap_category(&mut self, category_id: &str) -> Result<Vec<Book>> {
        let name = self
            .app
            .catalog()
            .category(category_id)
            .ok_or_else(|| ShelfError::NotFound(format!("category {}", category_id)))?
            .name
            .clone();
        Ok(self.search_for(&name).await)
    }

    /// Clear the text box and the results
    pub fn clear(&mut self) {
        self.query.clear();
        self.app.search().clear();
    }

    pub fn status(&self) -> SearchStatus {
        self.app.search().status()
    }

    pub async fn history(&self) -> Vec<String> {
        self.app.search().history().await
    }

    pub async fn clear_history(&self) {
        self.app.search().clear_history().await
    }

    pub fn categories(&self) -> &'a [Category] {
        self.app.catalog().categories()
    }

    pub fn trending(&self) -> &'a [String] {
        self.app.catalog().trending()
    }
}
