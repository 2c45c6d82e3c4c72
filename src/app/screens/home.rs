//! Home screen

use crate::app::{App, Route};
use crate::catalog::{Book, Collection};
use crate::core::notifications::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
        }
    }
}

/// 5-11 morning, 12-17 afternoon, otherwise evening
pub fn greeting_for_hour(hour: u32) -> Greeting {
    match hour {
        5..=11 => Greeting::Morning,
        12..=17 => Greeting::Afternoon,
        _ => Greeting::Evening,
    }
}

/// A horizontally scrolling list of books with a "see all" link
#[derive(Debug, Clone)]
pub struct HomeSection {
    pub collection: Collection,
    pub title: &'static str,
    pub see_all_path: &'static str,
    pub books: Vec<Book>,
}

impl HomeSection {
    fn of(app: &App, collection: Collection) -> Self {
        Self {
            collection,
            title: collection.title(),
            see_all_path: collection.see_all_path(),
            books: app.catalog().list(collection).to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomeScreen {
    pub greeting: Greeting,
    pub sections: Vec<HomeSection>,
    /// Owned book to resume, shown as a card when present
    pub continue_reading: Option<Book>,
}

impl HomeScreen {
    /// Build the home screen
    ///
    /// On the first entry of the app's lifetime, a "continue reading"
    /// notification is published if an owned book is in progress.
    pub async fn enter(app: &App) -> Self {
        let greeting = greeting_for_hour(app.clock().hour());

        let mut sections = Vec::with_capacity(4);
        if !app.catalog().derived_owned().is_empty() {
            sections.push(HomeSection::of(app, Collection::Owned));
        }
        for collection in [
            Collection::NewReleases,
            Collection::Popular,
            Collection::Recommended,
        ] {
            sections.push(HomeSection::of(app, collection));
        }

        let continue_reading = app.catalog().first_in_progress().cloned();
        if let Some(book) = &continue_reading {
            if app.take_continue_prompt() {
                app.notifications()
                    .publish(Notification::continue_reading(&book.title))
                    .await;
            }
        }

        Self {
            greeting,
            sections,
            continue_reading,
        }
    }

    pub fn section(&self, collection: Collection) -> Option<&HomeSection> {
        self.sections.iter().find(|s| s.collection == collection)
    }

    /// Reader route for the book to resume
    pub fn continue_reading_route(&self) -> Option<Route> {
        self.continue_reading
            .as_ref()
            .map(|book| Route::reader(book.id.clone(), false))
    }
}
