//! Preference value types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest font size reachable from the settings panel
pub const MIN_FONT_SIZE: u32 = 12;
/// Largest font size reachable from the settings panel
pub const MAX_FONT_SIZE: u32 = 24;
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Visual preset of the reader screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    #[default]
    Day,
    Night,
    Sepia,
    Paper,
}

impl ReadingMode {
    pub const ALL: [ReadingMode; 4] = [
        ReadingMode::Day,
        ReadingMode::Night,
        ReadingMode::Sepia,
        ReadingMode::Paper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingMode::Day => "day",
            ReadingMode::Night => "night",
            ReadingMode::Sepia => "sepia",
            ReadingMode::Paper => "paper",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
}

impl FontFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Sans => "sans",
            FontFamily::Serif => "serif",
        }
    }
}

/// Layout of book lists on the library screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

macro_rules! impl_text_enum {
    ($ty:ty, $label:literal, [$($variant:path),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == $variant.as_str() {
                        return Ok($variant);
                    }
                )+
                Err(format!(concat!("unknown ", $label, ": {}"), s))
            }
        }
    };
}

impl_text_enum!(
    ReadingMode,
    "reading mode",
    [ReadingMode::Day, ReadingMode::Night, ReadingMode::Sepia, ReadingMode::Paper]
);
impl_text_enum!(FontFamily, "font family", [FontFamily::Sans, FontFamily::Serif]);
impl_text_enum!(ViewMode, "view mode", [ViewMode::Grid, ViewMode::List]);

/// Process-wide display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceState {
    pub reading_mode: ReadingMode,
    pub font_size: u32,
    pub font_family: FontFamily,
    pub view_mode: ViewMode,
    pub is_dark_mode: bool,
    pub current_time: DateTime<Local>,
}

impl PreferenceState {
    /// Hard defaults at the given time
    pub fn defaults_at(now: DateTime<Local>) -> Self {
        Self {
            reading_mode: ReadingMode::Day,
            font_size: DEFAULT_FONT_SIZE,
            font_family: FontFamily::Sans,
            view_mode: ViewMode::Grid,
            is_dark_mode: false,
            current_time: now,
        }
    }
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self::defaults_at(Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_mode_text() {
        for mode in ReadingMode::ALL {
            assert_eq!(mode.to_string().parse::<ReadingMode>(), Ok(mode));
        }
        assert!("Night".parse::<ReadingMode>().is_err());
        assert!("dusk".parse::<ReadingMode>().is_err());
    }

    #[test]
    fn test_font_family_and_view_mode_text() {
        assert_eq!("serif".parse::<FontFamily>(), Ok(FontFamily::Serif));
        assert!("mono".parse::<FontFamily>().is_err());
        assert_eq!("list".parse::<ViewMode>(), Ok(ViewMode::List));
        assert_eq!(ViewMode::List.toggled(), ViewMode::Grid);
    }

    #[test]
    fn test_defaults() {
        let state = PreferenceState::default();
        assert_eq!(state.reading_mode, ReadingMode::Day);
        assert_eq!(state.font_size, 16);
        assert_eq!(state.font_family, FontFamily::Sans);
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert!(!state.is_dark_mode);
    }
}
