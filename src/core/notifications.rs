//! Notification bus for transient user-facing messages
//!
//! Screens publish toast-style notifications (purchase, favorite, bookmark,
//! logout, continue-reading, unsupported share) and the presentation layer
//! subscribes to them. Every subscriber sees every notification, the last
//! few are kept for inspection, and one failing handler never stops the rest.

use crate::core::error::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// What happened, from the user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AddedToCart,
    FavoriteAdded,
    FavoriteRemoved,
    BookmarkAdded,
    BookmarkRemoved,
    LoggedOut,
    ContinueReading,
    ShareUnsupported,
}

/// A single toast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How long the presentation layer should keep it on screen
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            description: None,
            duration_ms: duration.as_millis() as u64,
            timestamp: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn added_to_cart(book_title: &str) -> Self {
        Self::new(NotificationKind::AddedToCart, "Added to cart", Duration::from_secs(3))
            .with_description(format!("{} was added to your cart", book_title))
    }

    pub fn favorite_changed(book_title: &str, is_favorite: bool) -> Self {
        let (kind, title) = if is_favorite {
            (NotificationKind::FavoriteAdded, "Added to favorites")
        } else {
            (NotificationKind::FavoriteRemoved, "Removed from favorites")
        };
        Self::new(kind, title, Duration::from_secs(2)).with_description(book_title)
    }

    pub fn bookmark_added(page: u32) -> Self {
        Self::new(NotificationKind::BookmarkAdded, "Bookmark added", Duration::from_secs(2))
            .with_description(format!("Page {}", page))
    }

    pub fn bookmark_removed() -> Self {
        Self::new(NotificationKind::BookmarkRemoved, "Bookmark removed", Duration::from_secs(2))
    }

    pub fn logged_out() -> Self {
        Self::new(NotificationKind::LoggedOut, "Log out", Duration::from_secs(2))
            .with_description("You have been logged out")
    }

    pub fn continue_reading(book_title: &str) -> Self {
        Self::new(NotificationKind::ContinueReading, "Continue reading", Duration::from_secs(5))
            .with_description(format!("Pick up \"{}\" where you left off", book_title))
    }

    pub fn share_unsupported() -> Self {
        Self::new(NotificationKind::ShareUnsupported, "Share", Duration::from_secs(2))
            .with_description("Sharing is not supported on this device")
    }
}

/// Notification handler function type
pub type NotificationHandler =
    Arc<dyn Fn(Notification) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

#[derive(Clone)]
struct Subscriber {
    id: String,
    handler: NotificationHandler,
}

/// Filter for querying notification history
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub kinds: Option<Vec<NotificationKind>>,
    pub limit: Option<usize>,
}

impl NotificationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kinds(mut self, kinds: Vec<NotificationKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    /// Keep only the most recent `limit` matches
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Publish-subscribe hub for notifications
pub struct NotificationBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    history: Arc<RwLock<Vec<Notification>>>,
    max_history: usize,
}

impl NotificationBus {
    /// Create a new bus with default history size
    pub fn new() -> Self {
        Self::with_history_size(100)
    }

    pub fn with_history_size(max_history: usize) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            history: Arc::new(RwLock::new(Vec::new())),
            max_history,
        }
    }

    /// Register a handler for every notification published from now on
    pub async fn subscribe(&self, handler: NotificationHandler) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.push(Subscriber {
            id: Uuid::new_v4().to_string(),
            handler,
        });
    }

    /// Publish a notification to every subscriber
    ///
    /// Handlers run concurrently; a failing handler is logged and does not
    /// prevent the others from running.
    pub async fn publish(&self, notification: Notification) {
        {
            let mut history = self.history.write().await;
            history.push(notification.clone());
            if history.len() > self.max_history {
                let excess = history.len() - self.max_history;
                history.drain(0..excess);
            }
        }

        let targets: Vec<Subscriber> = self.subscribers.read().await.clone();

        tracing::debug!(
            kind = ?notification.kind,
            subscribers = targets.len(),
            "Publishing notification"
        );

        let calls = targets.into_iter().map(|subscriber| {
            let notification = notification.clone();
            async move {
                if let Err(e) = (subscriber.handler)(notification).await {
                    tracing::error!(
                        subscription = %subscriber.id,
                        error = %e,
                        "Notification handler failed"
                    );
                }
            }
        });
        join_all(calls).await;
    }

    /// Notification history, oldest first
    pub async fn history(&self, filter: NotificationFilter) -> Vec<Notification> {
        let history = self.history.read().await;
        let mut items: Vec<Notification> = history
            .iter()
            .filter(|n| filter.kinds.as_ref().map_or(true, |k| k.contains(&n.kind)))
            .cloned()
            .collect();

        if let Some(limit) = filter.limit {
            if items.len() > limit {
                items.drain(0..items.len() - limit);
            }
        }
        items
    }

    /// Most recent notification, if any
    pub async fn latest(&self) -> Option<Notification> {
        self.history.read().await.last().cloned()
    }

}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
