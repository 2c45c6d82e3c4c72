//! Wall-clock capability
//!
//! Time-of-day drives greetings and the automatic day/night reading mode, so
//! components read the clock through this trait instead of calling
//! `Local::now()` directly.

use chrono::{DateTime, Local, Timelike};
use std::sync::{Arc, RwLock};

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Hour of day in `0..24`
    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

/// The real system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// A clock fixed at the given hour of today
    pub fn at_hour(hour: u32) -> Self {
        let clock = Self::new(Local::now());
        clock.set_hour(hour);
        clock
    }

    pub fn set(&self, now: DateTime<Local>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }

    /// Move to `hour:00:00` of the current day
    pub fn set_hour(&self, hour: u32) {
        if let Ok(mut guard) = self.now.write() {
            let moved = guard
                .with_hour(hour)
                .and_then(|t| t.with_minute(0))
                .and_then(|t| t.with_second(0));
            if let Some(moved) = moved {
                *guard = moved;
            }
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
