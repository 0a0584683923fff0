//! Temporal query windows over the program catalog.
//!
//! These helpers compute the time windows the read-side queries filter
//! against. "Now" is always an explicit input, so there is no hidden clock
//! here, so every query is deterministic for a given catalog snapshot and
//! caller-supplied instant.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Minimum look-ahead for upcoming-program queries, in minutes.
pub const MIN_MINUTES_AHEAD: i64 = 5;

/// Maximum look-ahead for upcoming-program queries (24 hours).
pub const MAX_MINUTES_AHEAD: i64 = 1440;

/// Look-ahead applied when the caller does not supply one.
pub const DEFAULT_MINUTES_AHEAD: i64 = 60;

/// Maximum result count for upcoming-program queries.
pub const MAX_UPCOMING_LIMIT: i64 = 50;

/// Result count applied when the caller does not supply one.
pub const DEFAULT_UPCOMING_LIMIT: i64 = 10;

/// Validate the look-ahead of an upcoming-program query.
pub fn validate_minutes_ahead(minutes: i64) -> Result<(), CoreError> {
    if !(MIN_MINUTES_AHEAD..=MAX_MINUTES_AHEAD).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "minutes_ahead must be between {MIN_MINUTES_AHEAD} and {MAX_MINUTES_AHEAD}, \
             got {minutes}"
        )));
    }
    Ok(())
}

/// Validate the result cap of an upcoming-program query.
pub fn validate_upcoming_limit(limit: i64) -> Result<(), CoreError> {
    if !(1..=MAX_UPCOMING_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_UPCOMING_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

/// The `[now, now + minutes_ahead]` window an upcoming-program query
/// filters `start_time` against. Both bounds are inclusive, so a program
/// starting exactly at `now` counts as upcoming.
pub fn upcoming_window(now: Timestamp, minutes_ahead: i64) -> (Timestamp, Timestamp) {
    (now, now + Duration::minutes(minutes_ahead))
}

/// The window covering one calendar day (UTC) for the exact-date catalog
/// filter. Spans from the day's midnight to the following midnight, both
/// bounds inclusive.
pub fn day_window(date: NaiveDate) -> (Timestamp, Timestamp) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // -- upcoming_window ------------------------------------------------------

    #[test]
    fn window_spans_now_to_now_plus_minutes() {
        let now = Utc.with_ymd_and_hms(2026, 2, 13, 19, 0, 0).unwrap();
        let (from, to) = upcoming_window(now, 60);

        assert_eq!(from, now);
        assert_eq!(to, Utc.with_ymd_and_hms(2026, 2, 13, 20, 0, 0).unwrap());
    }

    #[test]
    fn program_starting_now_falls_in_window() {
        // Inclusive lower bound: start_time == now is both "currently
        // live" and "upcoming" for a window opened one minute earlier.
        let start = Utc.with_ymd_and_hms(2026, 2, 13, 19, 0, 0).unwrap();
        let (from, to) = upcoming_window(start - Duration::minutes(1), 5);

        assert!(from <= start && start <= to);
    }

    // -- day_window -----------------------------------------------------------

    #[test]
    fn day_window_spans_midnight_to_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 13).unwrap();
        let (from, to) = day_window(date);

        assert_eq!(from, Utc.with_ymd_and_hms(2026, 2, 13, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2026, 2, 14, 0, 0, 0).unwrap());
    }

    // -- validation -----------------------------------------------------------

    #[test]
    fn minutes_ahead_bounds() {
        assert!(validate_minutes_ahead(5).is_ok());
        assert!(validate_minutes_ahead(60).is_ok());
        assert!(validate_minutes_ahead(1440).is_ok());
        assert!(validate_minutes_ahead(4).is_err());
        assert!(validate_minutes_ahead(1441).is_err());
    }

    #[test]
    fn upcoming_limit_bounds() {
        assert!(validate_upcoming_limit(1).is_ok());
        assert!(validate_upcoming_limit(50).is_ok());
        assert!(validate_upcoming_limit(0).is_err());
        assert!(validate_upcoming_limit(51).is_err());
    }
}
