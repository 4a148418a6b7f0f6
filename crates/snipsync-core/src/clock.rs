//! Clock abstraction.
//!
//! Share-code expiry is driven entirely by wall-clock comparisons, so every
//! component that makes a time-based decision takes a [`Clock`] instead of
//! calling `Utc::now()` directly. Tests substitute a manually advanced clock.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
