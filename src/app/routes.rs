//! Navigation destinations

use std::fmt;

/// A screen the app can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Library,
    Search,
    BookDetail { id: String },
    Reader { id: String, sample: bool },
    Account,
    NotFound { path: String },
}

/// Bottom navigation tabs, in display order
pub const BOTTOM_NAV: [(&str, &str); 4] = [
    ("Home", "/"),
    ("Search", "/search"),
    ("Library", "/library"),
    ("Account", "/account"),
];

impl Route {
    /// Resolve a path such as `/reader/book1?sample=true`
    pub fn parse(path: &str) -> Self {
        let (path_part, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let trimmed = path_part.trim_end_matches('/');
        if !trimmed.is_empty() && !trimmed.starts_with('/') {
            return Route::NotFound {
                path: path.to_string(),
            };
        }
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["library"] => Route::Library,
            ["search"] => Route::Search,
            ["account"] => Route::Account,
            ["book", id] if !id.is_empty() => Route::BookDetail { id: id.to_string() },
            ["reader", id] if !id.is_empty() => Route::Reader {
                id: id.to_string(),
                sample: query.map_or(false, is_sample_query),
            },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn book(id: impl Into<String>) -> Self {
        Route::BookDetail { id: id.into() }
    }

    pub fn reader(id: impl Into<String>, sample: bool) -> Self {
        Route::Reader {
            id: id.into(),
            sample,
        }
    }

    /// The reader takes the whole screen
    pub fn shows_bottom_nav(&self) -> bool {
        !matches!(self, Route::Reader { .. })
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Library => "/library".to_string(),
            Route::Search => "/search".to_string(),
            Route::Account => "/account".to_string(),
            Route::BookDetail { id } => format!("/book/{}", id),
            Route::Reader { id, sample: true } => format!("/reader/{}?sample=true", id),
            Route::Reader { id, sample: false } => format!("/reader/{}", id),
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn is_sample_query(query: &str) -> bool {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, value)| key == "sample" && value == "true")
}
