//! Clock abstraction for session expiry.
//!
//! The client reads the current time through a `Clock` so tests can move time
//! forward without sleeping.

use std::fmt;

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
