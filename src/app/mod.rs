//! Application root
//!
//! [`App`] owns every shared context (device storage, catalog, preferences,
//! search engine, notification bus and the preference clock ticker) and
//! hands them to screens. Dropping the `App` stops the ticker.

pub mod routes;
pub mod screens;

pub use routes::{Route, BOTTOM_NAV};
pub use screens::{
    AccountScreen, DetailScreen, Greeting, HomeScreen, HomeSection, LibraryScreen, ReaderScreen,
    SearchScreen,
};

use crate::catalog::CatalogStore;
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::{Config, StorageBackend, StorageConfig};
use crate::core::error::Result;
use crate::core::notifications::NotificationBus;
use crate::preferences::{ClockTicker, Preferences};
use crate::search::SearchEngine;
use crate::storage::{DatabaseManager, KeyValueStore, MemoryStore, SqliteStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub struct App {
    config: Config,
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<CatalogStore>,
    preferences: Arc<Preferences>,
    search: Arc<SearchEngine>,
    notifications: Arc<NotificationBus>,
    clock: Arc<dyn Clock>,
    ticker: ClockTicker,
    continue_prompted: AtomicBool,
}

impl App {
    /// Build the app from configuration with the system clock
    ///
    /// Must be called from within a tokio runtime.
    pub async fn bootstrap(config: Config) -> Result<Self> {
        let store = open_store(&config.storage)?;
        Self::with_parts(config, store, Arc::new(SystemClock)).await
    }

    /// Build the app around an existing store and clock
    pub async fn with_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let catalog = Arc::new(CatalogStore::load(&config.catalog)?);
        let preferences = Arc::new(Preferences::load(store.clone(), clock.clone()).await);
        let search =
            Arc::new(SearchEngine::load(catalog.clone(), store.clone(), &config.search).await);
        let notifications = Arc::new(NotificationBus::with_history_size(
            config.notifications.history_size,
        ));
        let ticker = preferences.spawn_ticker(config.preferences.tick_interval());

        info!(
            books = catalog.universe().count(),
            owned = catalog.derived_owned().len(),
            "Shelf Reader initialized"
        );

        Ok(Self {
            config,
            store,
            catalog,
            preferences,
            search,
            notifications,
            clock,
            ticker,
            continue_prompted: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }

    pub fn search(&self) -> &Arc<SearchEngine> {
        &self.search
    }

    pub fn notifications(&self) -> &Arc<NotificationBus> {
        &self.notifications
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// True exactly once per app lifetime
    pub(crate) fn take_continue_prompt(&self) -> bool {
        !self.continue_prompted.swap(true, Ordering::SeqCst)
    }
}

/// Open the configured device store
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory device storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let db = DatabaseManager::new(
                &config.database_path,
                config.pool_size,
                config.busy_timeout(),
            )?;
            info!(path = ?config.database_path, "Using SQLite device storage");
            Ok(Arc::new(SqliteStore::new(db)))
        }
    }
}
