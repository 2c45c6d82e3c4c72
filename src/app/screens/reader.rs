//! Reader screen

use crate::app::App;
use crate::core::error::Result;
use crate::core::notifications::Notification;
use crate::preferences::{FontFamily, PreferenceState, ReadingMode};
use crate::reader::{BookmarkChange, Chapter, ReaderSession};

/// Full-screen reader with its settings panel
///
/// The session lives as long as the screen; preferences changed from the
/// settings panel are shared with the rest of the app.
pub struct ReaderScreen<'a> {
    app: &'a App,
    session: ReaderSession,
    settings_open: bool,
}

impl<'a> ReaderScreen<'a> {
    pub fn open(app: &'a App, book_id: &str, sample: bool) -> Result<Self> {
        let session = ReaderSession::open(app.catalog(), book_id, sample, &app.config().reader)?;
        Ok(Self {
            app,
            session,
            settings_open: false,
        })
    }

    pub fn session(&self) -> &ReaderSession {
        &self.session
    }

    pub fn chapter(&self) -> &'static Chapter {
        self.session.chapter()
    }

    /// Display preferences the page is rendered with
    pub fn display(&self) -> PreferenceState {
        self.app.preferences().snapshot()
    }

    /// Tapping the text toggles the chrome, it never turns the page
    pub fn tap_content(&self) -> bool {
        self.session.toggle_controls()
    }

    pub async fn next_page(&self) -> bool {
        self.session.next().await
    }

    pub async fn prev_page(&self) -> bool {
        self.session.prev().await
    }

    pub async fn toggle_bookmark(&self) -> BookmarkChange {
        let change = self.session.toggle_bookmark();
        let notification = match change {
            BookmarkChange::Added(page) => Notification::bookmark_added(page),
            BookmarkChange::Removed(_) => Notification::bookmark_removed(),
        };
        self.app.notifications().publish(notification).await;
        change
    }

    pub fn open_settings(&mut self) {
        self.settings_open = true;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub async fn set_reading_mode(&self, mode: ReadingMode) {
        self.app.preferences().set_reading_mode(mode).await
    }

    pub async fn increase_font_size(&self) -> u32 {
        self.app.preferences().increase_font_size().await
    }

    pub async fn decrease_font_size(&self) -> u32 {
        self.app.preferences().decrease_font_size().await
    }

    pub async fn set_font_family(&self, family: FontFamily) {
        self.app.preferences().set_font_family(family).await
    }
}
