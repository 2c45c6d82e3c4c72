//! Paginated reader
//!
//! Sample chapter content and the per-visit pagination state machine.

pub mod chapters;
pub mod session;

pub use chapters::{chapter_for_page, Chapter, SAMPLE_CHAPTERS};
pub use session::{progress_percent, BookmarkChange, ReaderSession, ReaderState};
