//! Catalog seed loading and validation

use super::models::{Book, CatalogSeed};
use crate::core::error::{ErrorContext, Result, ShelfError};
use std::collections::HashSet;
use std::path::Path;

/// Seed compiled into the binary
const BUNDLED_SEED: &str = include_str!("../../data/catalog.json");

/// Parse the bundled seed
pub fn bundled() -> Result<CatalogSeed> {
    parse(BUNDLED_SEED)
}

/// Read and parse a seed file from disk
pub fn from_file(path: &Path) -> Result<CatalogSeed> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog seed {}", path.display()))?;
    let seed = parse(&raw)?;
    tracing::info!(path = %path.display(), "Loaded catalog seed from file");
    Ok(seed)
}

/// Parse seed JSON and validate every collection
pub fn parse(raw: &str) -> Result<CatalogSeed> {
    let seed: CatalogSeed = serde_json::from_str(raw)?;
    validate(&seed)?;
    Ok(seed)
}

fn validate(seed: &CatalogSeed) -> Result<()> {
    validate_collection("popular", &seed.popular)?;
    validate_collection("newReleases", &seed.new_releases)?;
    validate_collection("recommendations", &seed.recommendations)?;

    let mut category_ids = HashSet::new();
    for category in &seed.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(ShelfError::InvalidData(format!(
                "duplicate category id: {}",
                category.id
            )));
        }
    }
    Ok(())
}

fn validate_collection(name: &str, books: &[Book]) -> Result<()> {
    let mut ids = HashSet::new();
    for book in books {
        if !ids.insert(book.id.as_str()) {
            return Err(ShelfError::InvalidData(format!(
                "duplicate id {} in {}",
                book.id, name
            )));
        }
        validate_book(book)?;
    }
    Ok(())
}

fn validate_book(book: &Book) -> Result<()> {
    let invalid = |reason: &str| -> Result<()> {
        Err(ShelfError::InvalidData(format!("book {}: {}", book.id, reason)))
    };

    if book.id.is_empty() {
        return invalid("empty id");
    }
    if book.page_count == 0 {
        return invalid("pageCount must be positive");
    }
    if !(0.0..=5.0).contains(&book.rating) {
        return invalid("rating must be within 0.0-5.0");
    }
    match book.progress {
        Some(p) if p > 100 => invalid("progress must be within 0-100"),
        Some(_) if !book.is_owned => invalid("progress on a book that is not owned"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_with(book_json: &str) -> String {
        format!(
            r#"{{"popular": [{}], "newReleases": [], "recommendations": []}}"#,
            book_json
        )
    }

    const BOOK: &str = r#"{"id":"b1","title":"T","author":"A","coverImage":"","price":1,
        "rating":4.5,"categories":["Novel"],"description":"","publishDate":"","pageCount":10,
        "isOwned":true,"progress":30}"#;

    #[test]
    fn test_bundled_seed_is_valid() {
        let seed = bundled().unwrap();
        assert_eq!(seed.popular.len(), 8);
        assert_eq!(seed.new_releases.len(), 4);
        assert_eq!(seed.recommendations.len(), 4);
        assert_eq!(seed.categories.len(), 9);
        assert_eq!(seed.trending.len(), 5);
    }

    #[test]
    fn test_minimal_seed() {
        let seed = parse(&seed_with(BOOK)).unwrap();
        assert_eq!(seed.popular[0].id, "b1");
        assert!(seed.categories.is_empty());
        assert!(seed.trending.is_empty());
    }

    #[test]
    fn test_rejects_progress_on_unowned_book() {
        let book = BOOK.replace(r#""isOwned":true"#, r#""isOwned":false"#);
        let err = parse(&seed_with(&book)).unwrap_err();
        assert!(matches!(err, ShelfError::InvalidData(_)));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let zero_pages = BOOK.replace(r#""pageCount":10"#, r#""pageCount":0"#);
        assert!(parse(&seed_with(&zero_pages)).is_err());

        let bad_rating = BOOK.replace(r#""rating":4.5"#, r#""rating":5.5"#);
        assert!(parse(&seed_with(&bad_rating)).is_err());

        let bad_progress = BOOK.replace(r#""progress":30"#, r#""progress":130"#);
        assert!(parse(&seed_with(&bad_progress)).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids_within_collection() {
        let raw = format!(
            r#"{{"popular": [{0}, {0}], "newReleases": [], "recommendations": []}}"#,
            BOOK
        );
        assert!(matches!(
            parse(&raw).unwrap_err(),
            ShelfError::InvalidData(_)
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            parse("{not json").unwrap_err(),
            ShelfError::Serialization(_)
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, seed_with(BOOK).as_bytes()).unwrap();
        let seed = from_file(file.path()).unwrap();
        assert_eq!(seed.popular.len(), 1);

        assert!(matches!(
            from_file(Path::new("/nonexistent/catalog.json")).unwrap_err(),
            ShelfError::Initialization(_)
        ));
    }
}
