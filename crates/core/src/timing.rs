//! Program interval arithmetic and validation.
//!
//! A program's `duration_minutes` is always derived from its start/end
//! bounds. Whenever either bound changes, the duration is recomputed from
//! the resulting interval; a caller-supplied duration that disagrees with
//! the bounds is never persisted.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Compute a program's duration in whole minutes, rounded to the nearest
/// minute.
///
/// Callers must validate the interval first (see [`validate_bounds`]);
/// this function assumes `end >= start`.
pub fn duration_minutes(start: Timestamp, end: Timestamp) -> i32 {
    let seconds = (end - start).num_seconds();
    ((seconds + 30) / 60) as i32
}

/// Validate that a program interval is well-formed.
///
/// The end bound must be strictly after the start bound; zero-length and
/// inverted intervals are rejected before any write happens.
pub fn validate_bounds(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "end_time ({end}) must be after start_time ({start})"
        )));
    }
    Ok(())
}

/// Merge a partial bounds update with the stored interval.
///
/// When only one bound is present in an update, the other keeps its stored
/// value; the returned pair is the interval the program would have after
/// the update, which callers validate and derive the duration from.
pub fn merge_bounds(
    stored_start: Timestamp,
    stored_end: Timestamp,
    new_start: Option<Timestamp>,
    new_end: Option<Timestamp>,
) -> (Timestamp, Timestamp) {
    (
        new_start.unwrap_or(stored_start),
        new_end.unwrap_or(stored_end),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    // -- duration_minutes -----------------------------------------------------

    #[test]
    fn half_hour_program_is_30_minutes() {
        let start = ts(2026, 2, 13, 19, 30, 0);
        let end = ts(2026, 2, 13, 20, 0, 0);
        assert_eq!(duration_minutes(start, end), 30);
    }

    #[test]
    fn ninety_minute_program() {
        let start = ts(2026, 2, 13, 20, 0, 0);
        let end = ts(2026, 2, 13, 21, 30, 0);
        assert_eq!(duration_minutes(start, end), 90);
    }

    #[test]
    fn sub_minute_remainder_rounds_to_nearest() {
        let start = ts(2026, 2, 13, 19, 0, 0);
        // 29 minutes 29 seconds rounds down, 29 minutes 30 seconds rounds up.
        assert_eq!(duration_minutes(start, ts(2026, 2, 13, 19, 29, 29)), 29);
        assert_eq!(duration_minutes(start, ts(2026, 2, 13, 19, 29, 30)), 30);
    }

    #[test]
    fn multi_day_program_duration() {
        let start = ts(2026, 2, 13, 23, 0, 0);
        let end = ts(2026, 2, 14, 1, 0, 0);
        assert_eq!(duration_minutes(start, end), 120);
    }

    // -- validate_bounds ------------------------------------------------------

    #[test]
    fn valid_interval_accepted() {
        let start = ts(2026, 2, 13, 19, 30, 0);
        let end = ts(2026, 2, 13, 20, 0, 0);
        assert!(validate_bounds(start, end).is_ok());
    }

    #[test]
    fn zero_length_interval_rejected() {
        let at = ts(2026, 2, 13, 19, 30, 0);
        assert!(validate_bounds(at, at).is_err());
    }

    #[test]
    fn inverted_interval_rejected() {
        let start = ts(2026, 2, 13, 20, 0, 0);
        let end = ts(2026, 2, 13, 19, 30, 0);
        assert!(validate_bounds(start, end).is_err());
    }

    // -- merge_bounds ---------------------------------------------------------

    #[test]
    fn merge_keeps_stored_values_when_update_is_empty() {
        let start = ts(2026, 2, 13, 19, 30, 0);
        let end = ts(2026, 2, 13, 20, 0, 0);
        assert_eq!(merge_bounds(start, end, None, None), (start, end));
    }

    #[test]
    fn merge_replaces_only_the_updated_bound() {
        let start = ts(2026, 2, 13, 19, 30, 0);
        let end = ts(2026, 2, 13, 20, 0, 0);
        let new_end = ts(2026, 2, 13, 20, 45, 0);

        let (s, e) = merge_bounds(start, end, None, Some(new_end));
        assert_eq!(s, start);
        assert_eq!(e, new_end);
    }

    #[test]
    fn merged_inverted_interval_fails_validation() {
        let start = ts(2026, 2, 13, 19, 30, 0);
        let end = ts(2026, 2, 13, 20, 0, 0);
        // Moving only the start past the stored end must be caught.
        let new_start = ts(2026, 2, 13, 21, 0, 0);

        let (s, e) = merge_bounds(start, end, Some(new_start), None);
        assert!(validate_bounds(s, e).is_err());
    }
}
