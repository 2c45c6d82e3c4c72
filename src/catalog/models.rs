//! Catalog models
//!
//! Data structures for book records and the named collections they live in

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Book record in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    /// Price in yen
    pub price: u32,
    pub rating: f32,
    pub categories: Vec<String>,
    pub description: String,
    pub publish_date: String,
    pub page_count: u32,
    // Per-user overlay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default)]
    pub is_owned: bool,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Book {
    /// Owned with progress of 100
    pub fn is_finished(&self) -> bool {
        self.is_owned && self.progress == Some(100)
    }

    /// Owned and started but not finished
    pub fn is_in_progress(&self) -> bool {
        self.is_owned && matches!(self.progress, Some(p) if p > 0 && p < 100)
    }

    /// Progress used for ordering; absent counts as not started
    pub fn progress_or_zero(&self) -> u8 {
        self.progress.unwrap_or(0)
    }
}

/// Browsable category shown on the library and search screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub count: u32,
}

/// Named collection of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Popular,
    NewReleases,
    Recommended,
    Owned,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Popular,
        Collection::NewReleases,
        Collection::Recommended,
        Collection::Owned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Popular => "popular",
            Collection::NewReleases => "new",
            Collection::Recommended => "recommended",
            Collection::Owned => "owned",
        }
    }

    /// Section heading used on the home screen
    pub fn title(&self) -> &'static str {
        match self {
            Collection::Popular => "Popular",
            Collection::NewReleases => "New Releases",
            Collection::Recommended => "Recommended for You",
            Collection::Owned => "My Library",
        }
    }

    /// Destination of the section's "see all" link
    pub fn see_all_path(&self) -> &'static str {
        match self {
            Collection::Popular => "/popular",
            Collection::NewReleases => "/new-releases",
            Collection::Recommended => "/recommendations",
            Collection::Owned => "/library",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Collection::Popular),
            "new" => Ok(Collection::NewReleases),
            "recommended" => Ok(Collection::Recommended),
            "owned" => Ok(Collection::Owned),
            other => Err(format!("unknown collection: {}", other)),
        }
    }
}

/// Shelf tab on the library screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibraryShelf {
    #[default]
    All,
    Reading,
    Finished,
}

impl LibraryShelf {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryShelf::All => "all",
            LibraryShelf::Reading => "reading",
            LibraryShelf::Finished => "finished",
        }
    }

    /// Whether an owned book sits on this shelf
    pub fn contains(&self, book: &Book) -> bool {
        match self {
            LibraryShelf::All => true,
            LibraryShelf::Reading => matches!(book.progress, Some(p) if p < 100),
            LibraryShelf::Finished => book.progress == Some(100),
        }
    }
}

impl FromStr for LibraryShelf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LibraryShelf::All),
            "reading" => Ok(LibraryShelf::Reading),
            "finished" => Ok(LibraryShelf::Finished),
            other => Err(format!("unknown shelf: {}", other)),
        }
    }
}

/// Raw shape of the catalog seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSeed {
    pub popular: Vec<Book>,
    pub new_releases: Vec<Book>,
    pub recommendations: Vec<Book>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub trending: Vec<String>,
}
