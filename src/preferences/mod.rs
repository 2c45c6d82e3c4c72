//! Reading preferences
//!
//! Display mode, font and layout choices shared by every screen, persisted
//! to device storage and switched between day and night by the clock.

pub mod auto_mode;
pub mod context;
pub mod types;

pub use auto_mode::{derive_auto_mode, is_night_hour};
pub use context::{ClockTicker, Preferences};
pub use types::{
    FontFamily, PreferenceState, ReadingMode, ViewMode, DEFAULT_FONT_SIZE, MAX_FONT_SIZE,
    MIN_FONT_SIZE,
};
