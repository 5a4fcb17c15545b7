//! Wall clock abstraction
//!
//! Export file names embed the local time, so the guest sync takes the clock
//! as a collaborator.

use chrono::{Local, NaiveDateTime};

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
