//! Preference context
//!
//! A single [`Preferences`] instance is created by the application root and
//! handed to every screen that needs it. State lives in a `watch` channel so
//! screens can subscribe to changes; every setter writes its own storage key.
//! A change and its storage write happen under one lock, so the stored value
//! always matches the last change, whether it came from a setter or the ticker.

use super::auto_mode::derive_auto_mode;
use super::types::{
    FontFamily, PreferenceState, ReadingMode, ViewMode, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
use crate::core::clock::Clock;
use crate::storage::{keys, KeyValueStore};
use chrono::Timelike;
use std::str::FromStr;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Shared, persisted display preferences
pub struct Preferences {
    state: watch::Sender<PreferenceState>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    writes: Mutex<()>,
}

impl Preferences {
    /// Start from hard defaults and overlay whatever the store holds
    ///
    /// Each field is hydrated independently; a missing, unreadable or
    /// malformed value keeps its default.
    pub async fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut state = PreferenceState::defaults_at(clock.now());

        if let Some(mode) = read_field::<ReadingMode>(store.as_ref(), keys::READING_MODE).await {
            state.reading_mode = mode;
        }
        if let Some(size) = read_field::<u32>(store.as_ref(), keys::FONT_SIZE).await {
            if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
                state.font_size = size;
            } else {
                tracing::warn!(
                    key = keys::FONT_SIZE,
                    size,
                    "Stored font size out of range, using default"
                );
            }
        }
        if let Some(family) = read_field::<FontFamily>(store.as_ref(), keys::FONT_FAMILY).await {
            state.font_family = family;
        }
        if let Some(view) = read_field::<ViewMode>(store.as_ref(), keys::VIEW_MODE).await {
            state.view_mode = view;
        }
        if let Some(dark) = read_field::<bool>(store.as_ref(), keys::DARK_MODE).await {
            state.is_dark_mode = dark;
        }

        tracing::debug!(
            mode = %state.reading_mode,
            font_size = state.font_size,
            family = %state.font_family,
            view = %state.view_mode,
            dark = state.is_dark_mode,
            "Preferences hydrated"
        );

        let (state, _) = watch::channel(state);
        Self {
            state,
            store,
            clock,
            writes: Mutex::new(()),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> PreferenceState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<PreferenceState> {
        self.state.subscribe()
    }

    pub fn reading_mode(&self) -> ReadingMode {
        self.state.borrow().reading_mode
    }

    pub fn font_size(&self) -> u32 {
        self.state.borrow().font_size
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.borrow().view_mode
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.borrow().is_dark_mode
    }

    pub async fn set_reading_mode(&self, mode: ReadingMode) {
        let _write = self.writes.lock().await;
        self.state.send_modify(|s| s.reading_mode = mode);
        self.persist(keys::READING_MODE, mode.as_str()).await;
    }

    /// Set the font size as given
    ///
    /// No range check happens here; the settings panel steps through
    /// [`increase_font_size`](Self::increase_font_size) and
    /// [`decrease_font_size`](Self::decrease_font_size), which stay in bounds.
    pub async fn set_font_size(&self, size: u32) {
        let _write = self.writes.lock().await;
        self.write_font_size(size).await;
    }

    /// One step larger, unless already at the maximum
    pub async fn increase_font_size(&self) -> u32 {
        let _write = self.writes.lock().await;
        let current = self.font_size();
        if current >= MAX_FONT_SIZE {
            return current;
        }
        self.write_font_size(current + 1).await;
        current + 1
    }

    /// One step smaller, unless already at the minimum
    pub async fn decrease_font_size(&self) -> u32 {
        let _write = self.writes.lock().await;
        let current = self.font_size();
        if current <= MIN_FONT_SIZE {
            return current;
        }
        self.write_font_size(current - 1).await;
        current - 1
    }

    async fn write_font_size(&self, size: u32) {
        self.state.send_modify(|s| s.font_size = size);
        self.persist(keys::FONT_SIZE, &size.to_string()).await;
    }

    pub async fn set_font_family(&self, family: FontFamily) {
        let _write = self.writes.lock().await;
        self.state.send_modify(|s| s.font_family = family);
        self.persist(keys::FONT_FAMILY, family.as_str()).await;
    }

    pub async fn set_view_mode(&self, view: ViewMode) {
        let _write = self.writes.lock().await;
        self.write_view_mode(view).await;
    }

    pub async fn toggle_view_mode(&self) -> ViewMode {
        let _write = self.writes.lock().await;
        let next = self.view_mode().toggled();
        self.write_view_mode(next).await;
        next
    }

    async fn write_view_mode(&self, view: ViewMode) {
        self.state.send_modify(|s| s.view_mode = view);
        self.persist(keys::VIEW_MODE, view.as_str()).await;
    }

    pub async fn set_dark_mode(&self, dark: bool) {
        let _write = self.writes.lock().await;
        self.state.send_modify(|s| s.is_dark_mode = dark);
        self.persist(keys::DARK_MODE, if dark { "true" } else { "false" })
            .await;
    }

    /// Refresh the clock and apply the day/night policy
    ///
    /// Returns the new mode when the clock caused a switch.
    pub async fn tick(&self) -> Option<ReadingMode> {
        let now = self.clock.now();
        let hour = now.hour();
        let mut switched = None;

        let _write = self.writes.lock().await;
        self.state.send_modify(|s| {
            s.current_time = now;
            let next = derive_auto_mode(hour, s.reading_mode);
            if next != s.reading_mode {
                s.reading_mode = next;
                s.is_dark_mode = next == ReadingMode::Night;
                switched = Some(next);
            }
        });

        if let Some(mode) = switched {
            tracing::info!(hour, mode = %mode, "Reading mode switched by clock");
            self.persist(keys::READING_MODE, mode.as_str()).await;
            self.persist(
                keys::DARK_MODE,
                if mode == ReadingMode::Night { "true" } else { "false" },
            )
            .await;
        }
        switched
    }

    /// Run [`tick`](Self::tick) every `period`, starting one period from now
    ///
    /// The task holds only a weak reference, so it also ends once the
    /// preferences are dropped.
    pub fn spawn_ticker(self: &Arc<Self>, period: Duration) -> ClockTicker {
        let weak: Weak<Self> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(prefs) = weak.upgrade() else {
                    break;
                };
                prefs.tick().await;
            }
            tracing::debug!("Preference ticker finished");
        });

        tracing::debug!(period_secs = period.as_secs(), "Preference ticker started");
        ClockTicker {
            handle: Some(handle),
        }
    }

    async fn persist(&self, key: &'static str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            tracing::warn!(key, error = %e, "Failed to persist preference");
        }
    }
}

async fn read_field<T: FromStr>(store: &dyn KeyValueStore, key: &'static str) -> Option<T> {
    match store.get(key).await {
        Ok(Some(raw)) => match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Malformed stored preference, using default");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored preference, using default");
            None
        }
    }
}

/// Handle to the running preference ticker
///
/// Dropping the handle stops the ticker.
pub struct ClockTicker {
    handle: Option<JoinHandle<()>>,
}

impl ClockTicker {
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Preference ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::error::{Result, ShelfError};
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ShelfError::Pool("unavailable".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ShelfError::Pool("unavailable".into()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(ShelfError::Pool("unavailable".into()))
        }
    }

    /// Holds writes of `"night"` back so a later write can overtake them
    struct SlowNightStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl KeyValueStore for SlowNightStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            if value == "night" {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key).await
        }
    }

    async fn prefs_with(
        entries: Vec<(&str, &str)>,
        hour: u32,
    ) -> (Arc<Preferences>, Arc<MemoryStore>, ManualClock) {
        let store = Arc::new(MemoryStore::with_entries(entries));
        let clock = ManualClock::at_hour(hour);
        let prefs = Preferences::load(store.clone(), Arc::new(clock.clone())).await;
        (Arc::new(prefs), store, clock)
    }

    #[tokio::test]
    async fn test_empty_store_gives_defaults() {
        let (prefs, _, _) = prefs_with(vec![], 12).await;
        let state = prefs.snapshot();
        assert_eq!(state.reading_mode, ReadingMode::Day);
        assert_eq!(state.font_size, 16);
        assert_eq!(state.font_family, FontFamily::Sans);
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert!(!state.is_dark_mode);
    }

    #[tokio::test]
    async fn test_hydration_is_per_field() {
        let (prefs, _, _) = prefs_with(
            vec![
                (keys::READING_MODE, "sepia"),
                (keys::FONT_SIZE, "not-a-number"),
                (keys::FONT_FAMILY, "serif"),
                (keys::VIEW_MODE, "diagonal"),
                (keys::DARK_MODE, "true"),
            ],
            12,
        )
        .await;
        let state = prefs.snapshot();
        assert_eq!(state.reading_mode, ReadingMode::Sepia);
        assert_eq!(state.font_size, 16);
        assert_eq!(state.font_family, FontFamily::Serif);
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert!(state.is_dark_mode);
    }

    #[tokio::test]
    async fn test_out_of_range_font_size_is_malformed() {
        let (prefs, _, _) = prefs_with(vec![(keys::FONT_SIZE, "40")], 12).await;
        assert_eq!(prefs.font_size(), 16);

        let (prefs, _, _) = prefs_with(vec![(keys::FONT_SIZE, "20")], 12).await;
        assert_eq!(prefs.font_size(), 20);
    }

    #[tokio::test]
    async fn test_unreadable_store_falls_back_and_setters_still_apply() {
        let prefs =
            Preferences::load(Arc::new(BrokenStore), Arc::new(ManualClock::at_hour(9))).await;
        assert_eq!(prefs.reading_mode(), ReadingMode::Day);

        prefs.set_reading_mode(ReadingMode::Paper).await;
        assert_eq!(prefs.reading_mode(), ReadingMode::Paper);
    }

    #[tokio::test]
    async fn test_each_setter_writes_its_key() {
        let (prefs, store, _) = prefs_with(vec![], 12).await;

        prefs.set_reading_mode(ReadingMode::Night).await;
        prefs.set_font_size(18).await;
        prefs.set_font_family(FontFamily::Serif).await;
        prefs.set_view_mode(ViewMode::List).await;
        prefs.set_dark_mode(true).await;

        assert_eq!(store.get(keys::READING_MODE).await.unwrap().as_deref(), Some("night"));
        assert_eq!(store.get(keys::FONT_SIZE).await.unwrap().as_deref(), Some("18"));
        assert_eq!(store.get(keys::FONT_FAMILY).await.unwrap().as_deref(), Some("serif"));
        assert_eq!(store.get(keys::VIEW_MODE).await.unwrap().as_deref(), Some("list"));
        assert_eq!(store.get(keys::DARK_MODE).await.unwrap().as_deref(), Some("true"));

        let reloaded = Preferences::load(store.clone(), Arc::new(ManualClock::at_hour(12))).await;
        assert_eq!(reloaded.snapshot().font_size, 18);
        assert_eq!(reloaded.view_mode(), ViewMode::List);
    }

    #[tokio::test]
    async fn test_reading_mode_setter_leaves_dark_flag() {
        let (prefs, _, _) = prefs_with(vec![], 12).await;
        prefs.set_reading_mode(ReadingMode::Night).await;
        assert!(!prefs.is_dark_mode());
    }

    #[tokio::test]
    async fn test_bare_setter_accepts_out_of_range() {
        let (prefs, store, _) = prefs_with(vec![], 12).await;
        prefs.set_font_size(40).await;
        assert_eq!(prefs.font_size(), 40);
        assert_eq!(store.get(keys::FONT_SIZE).await.unwrap().as_deref(), Some("40"));
    }

    #[tokio::test]
    async fn test_font_stepping_is_bounded() {
        let (prefs, _, _) = prefs_with(vec![], 12).await;
        for _ in 0..20 {
            prefs.increase_font_size().await;
        }
        assert_eq!(prefs.font_size(), MAX_FONT_SIZE);

        for _ in 0..20 {
            prefs.decrease_font_size().await;
        }
        assert_eq!(prefs.font_size(), MIN_FONT_SIZE);
    }

    #[tokio::test]
    async fn test_toggle_view_mode() {
        let (prefs, store, _) = prefs_with(vec![], 12).await;
        assert_eq!(prefs.toggle_view_mode().await, ViewMode::List);
        assert_eq!(prefs.toggle_view_mode().await, ViewMode::Grid);
        assert_eq!(store.get(keys::VIEW_MODE).await.unwrap().as_deref(), Some("grid"));
    }

    #[tokio::test]
    async fn test_tick_switches_day_and_night() {
        let (prefs, store, clock) = prefs_with(vec![], 12).await;
        assert_eq!(prefs.tick().await, None);

        clock.set_hour(21);
        assert_eq!(prefs.tick().await, Some(ReadingMode::Night));
        assert!(prefs.is_dark_mode());
        assert_eq!(store.get(keys::DARK_MODE).await.unwrap().as_deref(), Some("true"));

        clock.set_hour(7);
        assert_eq!(prefs.tick().await, Some(ReadingMode::Day));
        assert!(!prefs.is_dark_mode());
        assert_eq!(store.get(keys::READING_MODE).await.unwrap().as_deref(), Some("day"));
    }

    #[tokio::test]
    async fn test_tick_leaves_sepia_alone() {
        let (prefs, _, clock) = prefs_with(vec![(keys::READING_MODE, "sepia")], 12).await;
        clock.set_hour(23);
        assert_eq!(prefs.tick().await, None);
        assert_eq!(prefs.reading_mode(), ReadingMode::Sepia);
    }

    #[tokio::test]
    async fn test_tick_refreshes_current_time() {
        let (prefs, _, clock) = prefs_with(vec![], 10).await;
        clock.set_hour(11);
        prefs.tick().await;
        assert_eq!(prefs.snapshot().current_time.hour(), 11);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (prefs, _, _) = prefs_with(vec![], 12).await;
        let mut rx = prefs.subscribe();
        prefs.set_font_family(FontFamily::Serif).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().font_family, FontFamily::Serif);
    }

    #[tokio::test]
    async fn test_setter_during_slow_tick_write_is_what_gets_stored() {
        let store = Arc::new(SlowNightStore {
            inner: MemoryStore::new(),
        });
        let prefs = Arc::new(
            Preferences::load(store.clone(), Arc::new(ManualClock::at_hour(22))).await,
        );

        let ticking = tokio::spawn({
            let prefs = prefs.clone();
            async move { prefs.tick().await }
        });
        tokio::task::yield_now().await;

        prefs.set_reading_mode(ReadingMode::Sepia).await;
        ticking.await.unwrap();

        assert_eq!(prefs.reading_mode(), ReadingMode::Sepia);
        assert_eq!(
            store.get(keys::READING_MODE).await.unwrap().as_deref(),
            Some("sepia")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_fires_after_one_period() {
        let (prefs, _, _) = prefs_with(vec![], 22).await;
        let ticker = prefs.spawn_ticker(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(prefs.reading_mode(), ReadingMode::Day);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(prefs.reading_mode(), ReadingMode::Night);
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_ticker_stops_ticks() {
        let (prefs, _, _) = prefs_with(vec![], 22).await;
        let ticker = prefs.spawn_ticker(Duration::from_secs(60));
        drop(ticker);

        tokio::time::sleep(Duration::from_secs(180)).await;
        assert_eq!(prefs.reading_mode(), ReadingMode::Day);
    }
}
