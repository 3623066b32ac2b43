//! General time utility functions

use chrono::{DateTime, Local, TimeZone};

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A chrono format string for wall clock timestamps used in operator-facing logs.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Format the given time as an `HH:MM:SS` wall clock timestamp.
pub fn clock_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(CLOCK_FORMAT).to_string()
}

/// The current local time as an `HH:MM:SS` timestamp.
pub fn now_clock_timestamp() -> String {
    clock_timestamp(&Local::now())
}
