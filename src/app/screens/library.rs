//! Library screen

use crate::app::App;
use crate::catalog::{Book, Category, LibraryShelf};
use crate::preferences::ViewMode;
use crate::search::CategoryFilter;

/// Owned books with shelf tabs, a category filter and a grid/list toggle
pub struct LibraryScreen<'a> {
    app: &'a App,
    filter: CategoryFilter,
    shelf: LibraryShelf,
    filters_open: bool,
}

impl<'a> LibraryScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            filter: CategoryFilter::new(),
            shelf: LibraryShelf::All,
            filters_open: false,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.app.preferences().view_mode()
    }

    /// Switch between grid and list; the choice is persisted
    pub async fn toggle_view_mode(&self) -> ViewMode {
        self.app.preferences().toggle_view_mode().await
    }

    pub fn toggle_filter_panel(&mut self) -> bool {
        self.filters_open = !self.filters_open;
        self.filters_open
    }

    pub fn filters_open(&self) -> bool {
        self.filters_open
    }

    pub fn categories(&self) -> &'a [Category] {
        self.app.catalog().categories()
    }

    pub fn toggle_category(&mut self, category_id: &str) -> Option<&str> {
        self.filter.toggle(category_id)
    }

    pub fn active_category(&self) -> Option<&str> {
        self.filter.selected()
    }

    pub fn set_shelf(&mut self, shelf: LibraryShelf) {
        self.shelf = shelf;
    }

    pub fn shelf(&self) -> LibraryShelf {
        self.shelf
    }

    /// Books on the current shelf after the category filter
    pub fn books(&self) -> Vec<&'a Book> {
        self.books_on(self.shelf)
    }

    pub fn books_on(&self, shelf: LibraryShelf) -> Vec<&'a Book> {
        let catalog = self.app.catalog();
        self.filter
            .apply(catalog.derived_owned(), catalog)
            .into_iter()
            .filter(|book| shelf.contains(book))
            .collect()
    }
}
