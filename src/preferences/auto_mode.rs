//! Time-of-day reading mode policy
//!
//! Only `day` and `night` follow the clock. A user-selected `sepia` or
//! `paper` mode is never overridden.

use super::types::ReadingMode;

/// Hours `20..24` and `0..6`
pub fn is_night_hour(hour: u32) -> bool {
    hour >= 20 || hour < 6
}

/// Mode the clock would switch to at `hour`
pub fn derive_auto_mode(hour: u32, mode: ReadingMode) -> ReadingMode {
    match mode {
        ReadingMode::Day if is_night_hour(hour) => ReadingMode::Night,
        ReadingMode::Night if !is_night_hour(hour) => ReadingMode::Day,
        other => other,
    }
}
