//! Account screen

use crate::app::App;
use crate::core::notifications::Notification;

/// Menu entries shown above the display settings
pub const MENU_ITEMS: [&str; 4] = [
    "Reading settings",
    "Payment methods",
    "Notification settings",
    "Help & support",
];

pub struct AccountScreen<'a> {
    app: &'a App,
}

impl<'a> AccountScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    pub fn menu_items(&self) -> &'static [&'static str] {
        &MENU_ITEMS
    }

    pub fn dark_mode(&self) -> bool {
        self.app.preferences().is_dark_mode()
    }

    /// Flip the dark mode switch; the choice is persisted
    pub async fn set_dark_mode(&self, dark: bool) {
        self.app.preferences().set_dark_mode(dark).await
    }

    pub async fn logout(&self) {
        tracing::info!("User logged out");
        self.app
            .notifications()
            .publish(Notification::logged_out())
            .await;
    }

    pub fn version(&self) -> &'static str {
        crate::VERSION
    }
}
