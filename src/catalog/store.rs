//! Read-only catalog store
//!
//! Holds the seeded collections and serves lookups and derived views. Nothing
//! here mutates after construction; favorite and purchase actions on screens
//! stay local to those screens.

use super::models::{Book, CatalogSeed, Category, Collection};
use super::seed;
use crate::core::config::CatalogConfig;
use crate::core::error::{Result, ShelfError};
use std::collections::HashSet;

/// In-memory catalog
#[derive(Debug, Clone)]
pub struct CatalogStore {
    popular: Vec<Book>,
    new_releases: Vec<Book>,
    recommended: Vec<Book>,
    owned: Vec<Book>,
    categories: Vec<Category>,
    trending: Vec<String>,
}

impl CatalogStore {
    /// Build a store from an already validated seed
    pub fn new(seed: CatalogSeed) -> Self {
        let mut store = Self {
            popular: seed.popular,
            new_releases: seed.new_releases,
            recommended: seed.recommendations,
            owned: Vec::new(),
            categories: seed.categories,
            trending: seed.trending,
        };
        store.owned = derive_owned(store.universe());
        store
    }

    /// Load the configured seed file, or the bundled one when none is set
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let seed = match &config.seed_file {
            Some(path) => seed::from_file(path)?,
            None => seed::bundled()?,
        };
        let store = Self::new(seed);
        tracing::debug!(
            books = store.universe().count(),
            owned = store.owned.len(),
            "Catalog loaded"
        );
        Ok(store)
    }

    /// The bundled catalog
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(seed::bundled()?))
    }

    /// Find a book by id across every collection
    pub fn find_by_id(&self, id: &str) -> Result<&Book> {
        self.universe()
            .find(|book| book.id == id)
            .ok_or_else(|| ShelfError::NotFound(format!("book {}", id)))
    }

    /// Books of a named collection, in display order
    pub fn list(&self, collection: Collection) -> &[Book] {
        match collection {
            Collection::Popular => &self.popular,
            Collection::NewReleases => &self.new_releases,
            Collection::Recommended => &self.recommended,
            Collection::Owned => &self.owned,
        }
    }

    /// Popular, then new releases, then recommendations
    pub fn universe(&self) -> impl Iterator<Item = &Book> {
        self.popular
            .iter()
            .chain(self.new_releases.iter())
            .chain(self.recommended.iter())
    }

    /// Owned books: unfinished first, then by descending progress
    pub fn derived_owned(&self) -> &[Book] {
        &self.owned
    }

    /// First owned book that is started but not finished
    pub fn first_in_progress(&self) -> Option<&Book> {
        self.owned.iter().find(|book| book.is_in_progress())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Suggested queries for the search screen
    pub fn trending(&self) -> &[String] {
        &self.trending
    }
}

fn derive_owned<'a>(books: impl Iterator<Item = &'a Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    let mut owned: Vec<Book> = books
        .filter(|book| book.is_owned)
        .filter(|book| seen.insert(book.id.clone()))
        .cloned()
        .collect();

    // Stable sort keeps seed order among equal progress
    owned.sort_by(|a, b| {
        let a_done = a.progress_or_zero() == 100;
        let b_done = b.progress_or_zero() == 100;
        a_done
            .cmp(&b_done)
            .then_with(|| b.progress_or_zero().cmp(&a.progress_or_zero()))
    });
    owned
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn book(id: &str, owned: bool, progress: Option<u8>) -> Book {
        Book {
            id: id.into(),
            title: format!("Title {}", id),
            author: "Author".into(),
            cover_image: String::new(),
            price: 1000,
            rating: 4.0,
            categories: vec!["Novel".into()],
            description: String::new(),
            publish_date: "2021-01-01".into(),
            page_count: 100,
            progress,
            is_owned: owned,
            is_favorite: false,
        }
    }

    fn store_of(popular: Vec<Book>) -> CatalogStore {
        CatalogStore::new(CatalogSeed {
            popular,
            new_releases: vec![],
            recommendations: vec![],
            categories: vec![],
            trending: vec![],
        })
    }

    #[test]
    fn test_single_owned_book() {
        let store = store_of(vec![book("b1", true, Some(30)), book("b2", false, None)]);
        let ids: Vec<&str> = store.derived_owned().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1"]);
    }

    #[test]
    fn test_bundled_owned_order() {
        let store = CatalogStore::bundled().unwrap();
        let ids: Vec<&str> = store
            .list(Collection::Owned)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, vec!["book1", "book5", "book2", "book7", "book4"]);
        assert_eq!(store.first_in_progress().map(|b| b.id.as_str()), Some("book1"));
    }

    #[test]
    fn test_find_by_id_scans_every_collection() {
        let store = CatalogStore::bundled().unwrap();
        assert_eq!(store.find_by_id("book3").unwrap().title, "Jujutsu Kaisen Vol. 19");
        assert_eq!(store.find_by_id("new2").unwrap().author, "Liu Cixin");
        assert_eq!(store.find_by_id("rec4").unwrap().page_count, 216);

        let err = store.find_by_id("book99").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_universe_order_and_categories() {
        let store = CatalogStore::bundled().unwrap();
        let ids: Vec<&str> = store.universe().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), 16);
        assert_eq!(ids[0], "book1");
        assert_eq!(ids[8], "new1");
        assert_eq!(ids[12], "rec1");

        assert_eq!(store.category("manga").map(|c| c.name.as_str()), Some("Manga"));
        assert!(store.category("poetry").is_none());
        assert_eq!(store.trending().len(), 5);
    }

    #[test]
    fn test_owned_is_deduplicated() {
        let store = CatalogStore::new(CatalogSeed {
            popular: vec![book("b1", true, Some(30))],
            new_releases: vec![book("b1", true, Some(30))],
            recommendations: vec![],
            categories: vec![],
            trending: vec![],
        });
        assert_eq!(store.derived_owned().len(), 1);
    }

    #[test]
    fn test_load_uses_bundled_seed_without_file() {
        let store = CatalogStore::load(&CatalogConfig { seed_file: None }).unwrap();
        assert_eq!(store.list(Collection::Popular).len(), 8);
    }

    fn arb_books() -> impl Strategy<Value = Vec<Book>> {
        prop::collection::vec((any::<bool>(), prop::option::of(0u8..=100)), 0..20).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (owned, progress))| {
                        let progress = if owned { progress } else { None };
                        book(&format!("b{}", i), owned, progress)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_owned_unfinished_before_finished(books in arb_books()) {
            let expected = books.iter().filter(|b| b.is_owned).count();
            let store = store_of(books);
            let owned = store.derived_owned();

            prop_assert_eq!(owned.len(), expected);
            prop_assert!(owned.iter().all(|b| b.is_owned));

            for pair in owned.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let a_done = a.progress_or_zero() == 100;
                let b_done = b.progress_or_zero() == 100;
                prop_assert!(!(a_done && !b_done));
                if a_done == b_done {
                    prop_assert!(a.progress_or_zero() >= b.progress_or_zero());
                }
            }
        }
    }
}
