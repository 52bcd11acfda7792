//! # Ticks
//!
//! Replays record when they were set as the number of 100 nanosecond ticks since midnight of
//! January 1st in the year 1 (the .NET `DateTime` epoch). Conversion is only precise to the second:
//! the sub-second ticks are dropped when decoding and never restored when encoding, so a timestamp
//! that didn't land on a whole second will not survive a round trip unchanged.

use chrono::{DateTime, Utc};

/// Number of ticks between the tick epoch and the unix epoch
pub const EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// A tick is 100 nanoseconds
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Converts ticks to a UTC timestamp, truncating to whole seconds. Returns `None` if the instant
/// can't be represented.
pub fn time_from_ticks(ticks: i64) -> Option<DateTime<Utc>> {
    let secs = (i128::from(ticks) - i128::from(EPOCH_TICKS)) / i128::from(TICKS_PER_SECOND);
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)
}

/// Converts a timestamp to ticks, ignoring any sub-second component. Returns `None` if the ticks
/// don't fit in 64 bits. Every timestamp decoded by [`time_from_ticks`] fits.
pub fn ticks_from_time(time: &DateTime<Utc>) -> Option<i64> {
    let ticks = i128::from(time.timestamp()) * i128::from(TICKS_PER_SECOND)
        + i128::from(EPOCH_TICKS);
    i64::try_from(ticks).ok()
}
