//! Reader pagination state
//!
//! One [`ReaderSession`] exists per visit to the reader screen. Page turns
//! hold an animation flag for the configured delay before committing; turns
//! requested while it is held are dropped.

use super::chapters::{chapter_for_page, Chapter};
use crate::catalog::{Book, CatalogStore};
use crate::core::config::ReaderConfig;
use crate::core::error::Result;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;

/// Observable state of a reader session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderState {
    pub book_id: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub bookmark_page: Option<u32>,
    pub is_animating: bool,
    pub controls_visible: bool,
}

/// Result of toggling the bookmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkChange {
    Added(u32),
    Removed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Prev,
}

pub struct ReaderSession {
    book: Book,
    sample: bool,
    state: watch::Sender<ReaderState>,
    page_turn: Duration,
}

impl ReaderSession {
    /// Open `book_id` at page 1
    pub fn open(
        catalog: &CatalogStore,
        book_id: &str,
        sample: bool,
        config: &ReaderConfig,
    ) -> Result<Self> {
        let book = catalog.find_by_id(book_id)?.clone();
        let (state, _) = watch::channel(ReaderState {
            book_id: book.id.clone(),
            current_page: 1,
            total_pages: config.total_pages,
            bookmark_page: None,
            is_animating: false,
            controls_visible: true,
        });

        tracing::debug!(
            book = %book.id,
            sample,
            total_pages = config.total_pages,
            "Reader session opened"
        );
        let session = Self {
            book,
            sample,
            state,
            page_turn: config.page_turn(),
        };
        session.report_progress();
        Ok(session)
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn is_sample(&self) -> bool {
        self.sample
    }

    pub fn snapshot(&self) -> ReaderState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReaderState> {
        self.state.subscribe()
    }

    pub fn current_page(&self) -> u32 {
        self.state.borrow().current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.state.borrow().total_pages
    }

    pub fn bookmark_page(&self) -> Option<u32> {
        self.state.borrow().bookmark_page
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().is_animating
    }

    pub fn controls_visible(&self) -> bool {
        self.state.borrow().controls_visible
    }

    pub fn is_bookmarked(&self) -> bool {
        let state = self.state.borrow();
        state.bookmark_page == Some(state.current_page)
    }

    /// Turn forward one page; `false` if at the end or mid-turn
    pub async fn next(&self) -> bool {
        self.turn(Direction::Next).await
    }

    /// Turn back one page; `false` if at page 1 or mid-turn
    pub async fn prev(&self) -> bool {
        self.turn(Direction::Prev).await
    }

    async fn turn(&self, direction: Direction) -> bool {
        let started = self.state.send_if_modified(|s| {
            let allowed = match direction {
                Direction::Next => s.current_page < s.total_pages,
                Direction::Prev => s.current_page > 1,
            };
            if s.is_animating || !allowed {
                return false;
            }
            s.is_animating = true;
            true
        });
        if !started {
            return false;
        }

        let mut guard = TurnGuard {
            state: &self.state,
            committed: false,
        };
        if !self.page_turn.is_zero() {
            tokio::time::sleep(self.page_turn).await;
        }

        self.state.send_modify(|s| {
            match direction {
                Direction::Next => s.current_page += 1,
                Direction::Prev => s.current_page -= 1,
            }
            s.is_animating = false;
        });
        guard.committed = true;

        self.report_progress();
        true
    }

    /// Show or hide the navigation chrome; returns the new visibility
    pub fn toggle_controls(&self) -> bool {
        let mut visible = false;
        self.state.send_modify(|s| {
            s.controls_visible = !s.controls_visible;
            visible = s.controls_visible;
        });
        visible
    }

    /// Bookmark the current page, or remove the bookmark if it is here
    pub fn toggle_bookmark(&self) -> BookmarkChange {
        let mut change = BookmarkChange::Removed(0);
        self.state.send_modify(|s| {
            if s.bookmark_page == Some(s.current_page) {
                s.bookmark_page = None;
                change = BookmarkChange::Removed(s.current_page);
            } else {
                s.bookmark_page = Some(s.current_page);
                change = BookmarkChange::Added(s.current_page);
            }
        });
        change
    }

    /// Chapter for the current page
    pub fn chapter(&self) -> &'static Chapter {
        chapter_for_page(self.current_page())
    }

    /// `round(current / total * 100)`
    pub fn progress_percent(&self) -> u32 {
        let state = self.state.borrow();
        progress_percent(state.current_page, state.total_pages)
    }

    fn report_progress(&self) {
        if self.book.is_owned {
            tracing::info!(
                book = %self.book.id,
                progress = self.progress_percent(),
                "Reading progress"
            );
        }
    }
}

impl Drop for ReaderSession {
    fn drop(&mut self) {
        tracing::debug!(book = %self.book.id, page = self.current_page(), "Reader session closed");
    }
}

/// Clears the animation flag if a turn is abandoned before it commits
struct TurnGuard<'a> {
    state: &'a watch::Sender<ReaderState>,
    committed: bool,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.state.send_modify(|s| s.is_animating = false);
        }
    }
}

pub fn progress_percent(page: u32, total_pages: u32) -> u32 {
    if total_pages == 0 {
        return 0;
    }
    (page as f64 / total_pages as f64 * 100.0).round() as u32
}
