//! Command-line front end
//!
//! Each subcommand opens one screen, applies the requested actions and
//! prints the result. Notifications are printed as they are published.

use crate::app::{
    AccountScreen, App, DetailScreen, HomeScreen, LibraryScreen, ReaderScreen, Route,
    SearchScreen, BOTTOM_NAV,
};
use crate::catalog::format::{card_label, format_price};
use crate::catalog::{Book, LibraryShelf};
use crate::core::error::{ErrorReport, ShelfError};
use crate::core::notifications::NotificationHandler;
use crate::preferences::{FontFamily, ReadingMode, ViewMode};
use crate::search::SearchStatus;
use anyhow::Result;
use clap::Subcommand;
use std::sync::Arc;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the home screen
    Home,

    /// List owned books
    Library {
        /// Only books in this category (by id, e.g. `manga`)
        #[arg(long)]
        category: Option<String>,

        /// all, reading or finished
        #[arg(long, default_value = "all")]
        shelf: LibraryShelf,

        /// Switch the stored layout before listing (grid or list)
        #[arg(long)]
        view: Option<ViewMode>,
    },

    /// Search titles, authors and categories
    Search {
        query: String,
    },

    /// Show or clear recent searches
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Show a book's detail page
    Book {
        id: String,

        /// Toggle the favorite flag for this visit
        #[arg(long)]
        favorite: bool,

        /// Add the book to the cart
        #[arg(long)]
        purchase: bool,

        /// Try to share the book
        #[arg(long)]
        share: bool,
    },

    /// Open a book in the reader
    Read {
        id: String,

        /// Open as a free sample
        #[arg(long)]
        sample: bool,

        /// Pages to turn forward
        #[arg(long, default_value_t = 0)]
        pages: u32,

        /// Pages to turn back afterwards
        #[arg(long, default_value_t = 0)]
        back: u32,

        /// Toggle a bookmark on the final page
        #[arg(long)]
        bookmark: bool,
    },

    /// Show or change reading preferences
    Prefs {
        /// day, night, sepia or paper
        #[arg(long)]
        mode: Option<ReadingMode>,

        #[arg(long)]
        font_size: Option<u32>,

        /// sans or serif
        #[arg(long)]
        font_family: Option<FontFamily>,

        /// grid or list
        #[arg(long)]
        view: Option<ViewMode>,

        #[arg(long)]
        dark: Option<bool>,
    },

    /// Resolve a navigation path
    Route {
        path: String,
    },

    /// Print the effective configuration
    Config,
}

/// Run one command against a bootstrapped app
pub async fn run(app: &App, command: Command) -> Result<()> {
    app.notifications().subscribe(print_notification()).await;

    match command {
        Command::Home => home(app).await,
        Command::Library {
            category,
            shelf,
            view,
        } => library(app, category, shelf, view).await,
        Command::Search { query } => search(app, &query).await,
        Command::History { clear } => history(app, clear).await,
        Command::Book {
            id,
            favorite,
            purchase,
            share,
        } => book(app, &id, favorite, purchase, share).await,
        Command::Read {
            id,
            sample,
            pages,
            back,
            bookmark,
        } => read(app, &id, sample, pages, back, bookmark).await,
        Command::Prefs {
            mode,
            font_size,
            font_family,
            view,
            dark,
        } => prefs(app, mode, font_size, font_family, view, dark).await,
        Command::Route { path } => {
            route(&path);
            Ok(())
        }
        Command::Config => {
            print!("{}", app.config().to_toml()?);
            Ok(())
        }
    }
}

fn print_notification() -> NotificationHandler {
    Arc::new(|notification| {
        Box::pin(async move {
            match &notification.description {
                Some(description) => println!("* {}: {}", notification.title, description),
                None => println!("* {}", notification.title),
            }
            Ok(())
        })
    })
}

/// Print user-facing errors and swallow them; propagate everything else
fn surface(err: ShelfError) -> Result<()> {
    if err.user_message().is_some() {
        println!("{}", ErrorReport::from_error(&err));
        Ok(())
    } else {
        Err(err.into())
    }
}

fn book_line(book: &Book) -> String {
    let mut line = format!("{:<8} {} / {}", book.id, book.title, book.author);
    if let Some(label) = card_label(book) {
        line.push_str(&format!(" [{}]", label));
    } else if !book.is_owned {
        line.push_str(&format!(" {}", format_price(book.price)));
    }
    line
}

fn print_books<'b>(books: impl IntoIterator<Item = &'b Book>, view: ViewMode) {
    let books: Vec<&Book> = books.into_iter().collect();
    if books.is_empty() {
        println!("  (no books)");
        return;
    }
    match view {
        ViewMode::List => {
            for book in books {
                println!("  {}", book_line(book));
                println!("           {}", book.categories.join(", "));
            }
        }
        ViewMode::Grid => {
            for row in books.chunks(3) {
                let cells: Vec<String> = row.iter().map(|b| format!("{:<28}", b.title)).collect();
                println!("  {}", cells.join(" "));
            }
        }
    }
}

async fn home(app: &App) -> Result<()> {
    let home = HomeScreen::enter(app).await;
    println!("{}, reader", home.greeting.text());

    if let Some(book) = &home.continue_reading {
        println!();
        println!(
            "Continue where you left off: {} ({}%) -> {}",
            book.title,
            book.progress_or_zero(),
            home.continue_reading_route()
                .map(|r| r.to_path())
                .unwrap_or_default()
        );
    }

    for section in &home.sections {
        println!();
        println!("{}  (see all: {})", section.title, section.see_all_path);
        for book in &section.books {
            println!("  {}", book_line(book));
        }
    }
    Ok(())
}

async fn library(
    app: &App,
    category: Option<String>,
    shelf: LibraryShelf,
    view: Option<ViewMode>,
) -> Result<()> {
    let mut screen = LibraryScreen::new(app);
    if let Some(view) = view {
        if view != screen.view_mode() {
            screen.toggle_view_mode().await;
        }
    }
    if let Some(id) = category.as_deref() {
        screen.toggle_category(id);
    }
    screen.set_shelf(shelf);

    let books = screen.books();
    println!(
        "My Library: {} ({} books{})",
        shelf.as_str(),
        books.len(),
        screen
            .active_category()
            .map(|c| format!(", category {}", c))
            .unwrap_or_default()
    );
    print_books(books, screen.view_mode());
    Ok(())
}

async fn search(app: &App, query: &str) -> Result<()> {
    let mut screen = SearchScreen::new(app);
    let results = screen.search_for(query).await;

    if screen.status() == SearchStatus::Idle {
        println!("Enter a title, author or keyword.");
        return Ok(());
    }

    println!("Results: {}", results.len());
    print_books(&results, ViewMode::List);
    Ok(())
}

async fn history(app: &App, clear: bool) -> Result<()> {
    let screen = SearchScreen::new(app);
    if clear {
        screen.clear_history().await;
        println!("Search history cleared");
        return Ok(());
    }

    let entries = screen.history().await;
    if entries.is_empty() {
        println!("No recent searches");
    }
    for entry in entries {
        println!("  {}", entry);
    }

    println!();
    println!("Categories:");
    for category in screen.categories() {
        println!("  {:<10} {} ({})", category.id, category.name, category.count);
    }
    println!("Trending:");
    for term in screen.trending() {
        println!("  {}", term);
    }
    Ok(())
}

async fn book(app: &App, id: &str, favorite: bool, purchase: bool, share: bool) -> Result<()> {
    let mut detail = match DetailScreen::open(app, id) {
        Ok(detail) => detail,
        Err(e) => return surface(e),
    };

    let book = detail.book().clone();
    println!("{}", book.title);
    println!("{}", book.author);
    println!(
        "{}{} {:.1}   {}",
        "★".repeat(detail.stars() as usize),
        "☆".repeat(5 - detail.stars() as usize),
        book.rating,
        detail.price()
    );
    println!("{}", book.categories.join(" · "));
    println!();
    println!("{}", book.description);
    println!();
    println!(
        "Published {}   {} pages   about {} MB",
        book.publish_date,
        book.page_count,
        detail.size_mb()
    );
    println!("Read a sample: {}", detail.read_sample());

    if favorite {
        detail.toggle_favorite().await;
    }
    if purchase {
        detail.purchase().await;
    }
    if share {
        if let Err(e) = detail.share().await {
            tracing::debug!(error = %e, "Share unavailable");
        }
    }
    Ok(())
}

async fn read(
    app: &App,
    id: &str,
    sample: bool,
    pages: u32,
    back: u32,
    bookmark: bool,
) -> Result<()> {
    let screen = match ReaderScreen::open(app, id, sample) {
        Ok(screen) => screen,
        Err(e) => return surface(e),
    };

    for _ in 0..pages {
        if !screen.next_page().await {
            break;
        }
    }
    for _ in 0..back {
        if !screen.prev_page().await {
            break;
        }
    }
    if bookmark {
        screen.toggle_bookmark().await;
    }

    let session = screen.session();
    let display = screen.display();
    let chapter = screen.chapter();
    println!(
        "{}{}  [{} mode, {}px {}]",
        session.book().title,
        if session.is_sample() { " (sample)" } else { "" },
        display.reading_mode,
        display.font_size,
        display.font_family
    );
    println!();
    println!("{}", chapter.title);
    for paragraph in chapter.paragraphs() {
        println!();
        println!("{}", paragraph);
    }
    println!();
    println!(
        "Page {}/{}   {}%{}",
        session.current_page(),
        session.total_pages(),
        session.progress_percent(),
        if session.is_bookmarked() { "   (bookmarked)" } else { "" }
    );
    Ok(())
}

async fn prefs(
    app: &App,
    mode: Option<ReadingMode>,
    font_size: Option<u32>,
    font_family: Option<FontFamily>,
    view: Option<ViewMode>,
    dark: Option<bool>,
) -> Result<()> {
    let preferences = app.preferences();
    if let Some(mode) = mode {
        preferences.set_reading_mode(mode).await;
    }
    if let Some(size) = font_size {
        preferences.set_font_size(size).await;
    }
    if let Some(family) = font_family {
        preferences.set_font_family(family).await;
    }
    if let Some(view) = view {
        preferences.set_view_mode(view).await;
    }
    if let Some(dark) = dark {
        AccountScreen::new(app).set_dark_mode(dark).await;
    }

    let state = preferences.snapshot();
    println!("reading mode  {}", state.reading_mode);
    println!("font size     {}", state.font_size);
    println!("font family   {}", state.font_family);
    println!("view mode     {}", state.view_mode);
    println!("dark mode     {}", state.is_dark_mode);
    println!("clock         {}", state.current_time.format("%H:%M"));
    Ok(())
}

fn route(path: &str) {
    let route = Route::parse(path);
    println!("{:?}", route);
    if route.shows_bottom_nav() {
        let tabs: Vec<String> = BOTTOM_NAV
            .iter()
            .map(|(label, tab_path)| {
                if *tab_path == route.to_path() {
                    format!("[{}]", label)
                } else {
                    label.to_string()
                }
            })
            .collect();
        println!("{}", tabs.join("  "));
    }
}
