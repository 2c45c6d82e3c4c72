//! Book detail screen

use crate::app::{App, Route};
use crate::catalog::format::{estimated_size_mb, format_price, star_count};
use crate::catalog::Book;
use crate::core::error::{Result, ShelfError};
use crate::core::notifications::Notification;

/// Detail page for one book
///
/// The favorite flag is local to this screen: it starts cleared on every
/// visit and is never written back to the catalog.
pub struct DetailScreen<'a> {
    app: &'a App,
    book: Book,
    is_favorite: bool,
    description_expanded: bool,
}

impl<'a> DetailScreen<'a> {
    pub fn open(app: &'a App, book_id: &str) -> Result<Self> {
        let book = app.catalog().find_by_id(book_id)?.clone();
        Ok(Self {
            app,
            book,
            is_favorite: false,
            description_expanded: false,
        })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn price(&self) -> String {
        format_price(self.book.price)
    }

    pub fn stars(&self) -> u8 {
        star_count(self.book.rating)
    }

    pub fn size_mb(&self) -> u32 {
        estimated_size_mb(self.book.page_count)
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub async fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.app
            .notifications()
            .publish(Notification::favorite_changed(&self.book.title, self.is_favorite))
            .await;
        self.is_favorite
    }

    /// Add to cart; only a notification, no purchase state is kept
    pub async fn purchase(&self) {
        tracing::info!(book = %self.book.id, "Added to cart");
        self.app
            .notifications()
            .publish(Notification::added_to_cart(&self.book.title))
            .await;
    }

    /// Native sharing is unavailable; the user gets a polite notice and
    /// the caller an `Unsupported` error
    pub async fn share(&self) -> Result<()> {
        tracing::debug!(book = %self.book.id, "Share requested");
        self.app
            .notifications()
            .publish(Notification::share_unsupported())
            .await;
        Err(ShelfError::Unsupported("share".to_string()))
    }

    pub fn read_sample(&self) -> Route {
        Route::reader(self.book.id.clone(), true)
    }

    pub fn toggle_description(&mut self) -> bool {
        self.description_expanded = !self.description_expanded;
        self.description_expanded
    }

    pub fn description_expanded(&self) -> bool {
        self.description_expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::catalog::Collection;
    use crate::core::notifications::NotificationKind;

    #[tokio::test]
    async fn test_unknown_book() {
        let app = test_app(12).await;
        let err = DetailScreen::open(&app, "nope").err().unwrap();
        assert_eq!(err.user_message().as_deref(), Some("The book could not be found."));
    }

    #[tokio::test]
    async fn test_book_facts() {
        let app = test_app(12).await;
        let detail = DetailScreen::open(&app, "book5").unwrap();
        assert_eq!(detail.price(), "¥1,760");
        assert_eq!(detail.stars(), 4);
        assert_eq!(detail.size_mb(), 65);
        assert_eq!(detail.read_sample(), Route::reader("book5", true));
    }

    #[tokio::test]
    async fn test_favorite_is_local() {
        let app = test_app(12).await;
        let mut detail = DetailScreen::open(&app, "book4").unwrap();
        assert!(!detail.is_favorite());
        assert!(detail.toggle_favorite().await);
        assert_eq!(
            app.notifications().latest().await.map(|n| n.kind),
            Some(NotificationKind::FavoriteAdded)
        );
        assert!(!detail.toggle_favorite().await);
        assert_eq!(
            app.notifications().latest().await.map(|n| n.kind),
            Some(NotificationKind::FavoriteRemoved)
        );

        detail.toggle_favorite().await;
        let again = DetailScreen::open(&app, "book4").unwrap();
        assert!(!again.is_favorite());
        let in_list = app
            .catalog()
            .list(Collection::Popular)
            .iter()
            .find(|b| b.id == "book4")
            .unwrap();
        assert!(in_list.is_favorite);
    }

    #[tokio::test]
    async fn test_purchase_and_share_notify() {
        let app = test_app(12).await;
        let detail = DetailScreen::open(&app, "new2").unwrap();

        detail.purchase().await;
        let latest = app.notifications().latest().await.unwrap();
        assert_eq!(latest.kind, NotificationKind::AddedToCart);
        assert!(latest.description.unwrap().contains("The Three-Body Problem"));

        let err = detail.share().await.unwrap_err();
        assert!(matches!(err, ShelfError::Unsupported(_)));
        assert_eq!(
            app.notifications().latest().await.map(|n| n.kind),
            Some(NotificationKind::ShareUnsupported)
        );
    }

    #[tokio::test]
    async fn test_description_toggle() {
        let app = test_app(12).await;
        let mut detail = DetailScreen::open(&app, "book1").unwrap();
        assert!(!detail.description_expanded());
        assert!(detail.toggle_description());
        assert!(!detail.toggle_description());
    }
}
