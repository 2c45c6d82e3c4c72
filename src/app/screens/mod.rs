//! Screen models
//!
//! Each screen borrows the [`App`](super::App) and exposes the data and
//! actions its page needs. Rendering is left to the caller.

pub mod account;
pub mod detail;
pub mod home;
pub mod library;
pub mod reader;
pub mod search;

pub use account::AccountScreen;
pub use detail::DetailScreen;
pub use home::{greeting_for_hour, Greeting, HomeScreen, HomeSection};
pub use library::LibraryScreen;
pub use reader::ReaderScreen;
pub use search::SearchScreen;
