//! Scalar parsing helpers for feed attribute values.
//!
//! Each helper returns `None` on malformed input; [`crate::mapper`] turns that
//! into a [`crate::FeedError::InvalidAttribute`] naming the attribute.

use chrono::NaiveDateTime;

/// Parses a feed timestamp.
///
/// The feed mixes `2024-03-01T07:53:00` and `2024-03-01 07:53:00`; both are
/// accepted.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Parses an `HH.MM` hour into minutes since midnight (`hours * 60 + minutes`).
///
/// `24.00` is accepted as end of day.
#[must_use]
pub fn parse_hour(s: &str) -> Option<u16> {
    let (hours, minutes) = s.trim().split_once('.')?;
    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Parses a finite decimal number.
#[must_use]
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Interprets a feed flag attribute (`"1"` is set, anything else is not).
#[must_use]
pub fn parse_flag(s: Option<&str>) -> bool {
    matches!(s.map(str::trim), Some("1"))
}
