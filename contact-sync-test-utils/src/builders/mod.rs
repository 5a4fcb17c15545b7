//! Builders for test records

mod order;
mod website;

pub use order::{OrderBuilder, product};
pub use website::WebsiteBuilder;

use chrono::{NaiveDate, NaiveDateTime};
use contact_sync_core::FixedClock;

/// Clock frozen at the given local time
pub fn fixed_clock(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> FixedClock {
    let instant: NaiveDateTime = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap();
    FixedClock(instant)
}
