//! Core application layer
//!
//! This module provides the ambient services every component relies on:
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system
//! - Wall-clock capability
//! - Notification bus for transient user-facing messages

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifications;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ErrorContext, ErrorReport, Result, ShelfError};
pub use logging::Logger;
pub use notifications::{Notification, NotificationBus, NotificationKind};
