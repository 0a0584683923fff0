//! Grid aggregation: turning a time-sorted program list into day-grouped
//! presentation structure.
//!
//! Programs are stored as UTC instants. All day-bucketing and week
//! anchoring happens in one explicitly supplied display offset, never the
//! host machine's local timezone, so the same catalog snapshot always
//! produces the same grid.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum number of weeks ahead a weekly grid may be requested for.
pub const MAX_WEEKS_AHEAD: u32 = 4;

/// Day names indexed by `Weekday::num_days_from_monday()` (Monday = 0).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A single calendar day's worth of programs in the display timezone.
#[derive(Debug, Serialize)]
pub struct DayGroup<T> {
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Day name (`Monday`..`Sunday`).
    pub day_name: &'static str,
    /// Display label combining day name with zero-padded day/month,
    /// e.g. `Monday 15/01`.
    pub day_label: String,
    /// Programs starting on this day, in ascending start-time order.
    pub programs: Vec<T>,
}

/// Display name for a weekday.
pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Display label for a calendar date, e.g. `Monday 15/01`.
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "{} {:02}/{:02}",
        day_name(date.weekday()),
        date.day(),
        date.month()
    )
}

/// Bucket `items` into day groups keyed by the calendar date of their
/// start time in the display `offset`.
///
/// Groups are ordered ascending by calendar date (date ordering, not
/// string ordering, so cross-month and cross-year windows sort
/// correctly). Within each group, items keep the order they arrived in;
/// callers pass catalog results already sorted by start time.
///
/// An empty input yields an empty group list.
pub fn group_by_day<T>(
    items: Vec<T>,
    offset: FixedOffset,
    start_time: impl Fn(&T) -> Timestamp,
) -> Vec<DayGroup<T>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();

    for item in items {
        let local_date = start_time(&item).with_timezone(&offset).date_naive();
        buckets.entry(local_date).or_default().push(item);
    }

    buckets
        .into_iter()
        .map(|(date, programs)| DayGroup {
            date: date.format("%Y-%m-%d").to_string(),
            day_name: day_name(date.weekday()),
            day_label: day_label(date),
            programs,
        })
        .collect()
}

/// UTC instant of the local midnight opening `date` in the display
/// `offset`.
pub fn day_start(date: NaiveDate, offset: FixedOffset) -> Timestamp {
    // Fixed offsets have no DST gaps, so local midnight always exists.
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .unwrap()
        .to_utc()
}

/// Compute the `[Monday 00:00, +7 days]` window for the week containing
/// `now` shifted forward by `weeks_ahead` weeks, anchored in the display
/// `offset`.
///
/// The returned bounds are UTC instants suitable for catalog range
/// queries on `start_time`.
pub fn week_window(
    now: Timestamp,
    weeks_ahead: u32,
    offset: FixedOffset,
) -> (Timestamp, Timestamp) {
    let target = now.with_timezone(&offset).date_naive() + Duration::weeks(i64::from(weeks_ahead));
    let monday = target - Duration::days(i64::from(target.weekday().num_days_from_monday()));
    let start = day_start(monday, offset);

    (start, start + Duration::days(7))
}

/// Validate the `weeks_ahead` parameter of a weekly grid request.
pub fn validate_weeks_ahead(weeks_ahead: u32) -> Result<(), CoreError> {
    if weeks_ahead > MAX_WEEKS_AHEAD {
        return Err(CoreError::Validation(format!(
            "weeks_ahead must be between 0 and {MAX_WEEKS_AHEAD}, got {weeks_ahead}"
        )));
    }
    Ok(())
}

/// Distinct program types observed in a result set, sorted for stable
/// output. Feeds the category filter UI on the weekly grid.
pub fn types_available<'a>(types: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: std::collections::BTreeSet<&str> = types.collect();
    distinct.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // -- group_by_day ---------------------------------------------------------

    #[test]
    fn groups_monday_and_sunday_of_same_week() {
        // 2026-02-09 is a Monday, 2026-02-15 the following Sunday.
        let items = vec![ts(2026, 2, 9, 8, 0), ts(2026, 2, 15, 23, 0)];
        let days = group_by_day(items, utc_offset(), |t| *t);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2026-02-09");
        assert_eq!(days[0].day_name, "Monday");
        assert_eq!(days[1].date, "2026-02-15");
        assert_eq!(days[1].day_name, "Sunday");
        assert_eq!(days[0].programs.len(), 1);
        assert_eq!(days[1].programs.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let days = group_by_day(Vec::<Timestamp>::new(), utc_offset(), |t| *t);
        assert!(days.is_empty());
    }

    #[test]
    fn same_day_items_share_one_group_in_input_order() {
        let items = vec![ts(2026, 2, 9, 8, 0), ts(2026, 2, 9, 12, 0), ts(2026, 2, 9, 20, 0)];
        let days = group_by_day(items, utc_offset(), |t| *t);

        assert_eq!(days.len(), 1);
        assert_eq!(
            days[0].programs,
            vec![ts(2026, 2, 9, 8, 0), ts(2026, 2, 9, 12, 0), ts(2026, 2, 9, 20, 0)]
        );
    }

    #[test]
    fn cross_month_groups_order_by_date_not_string() {
        // 2026-01-31 (Saturday) must sort before 2026-02-01 (Sunday).
        let items = vec![ts(2026, 1, 31, 10, 0), ts(2026, 2, 1, 10, 0)];
        let days = group_by_day(items, utc_offset(), |t| *t);

        assert_eq!(days[0].date, "2026-01-31");
        assert_eq!(days[1].date, "2026-02-01");
    }

    #[test]
    fn display_offset_shifts_day_bucket() {
        // 23:00 UTC on Monday is 02:00 Tuesday at UTC+3.
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let days = group_by_day(vec![ts(2026, 2, 9, 23, 0)], plus_three, |t| *t);

        assert_eq!(days[0].date, "2026-02-10");
        assert_eq!(days[0].day_name, "Tuesday");
    }

    // -- day_label ------------------------------------------------------------

    #[test]
    fn label_zero_pads_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(day_label(date), "Monday 05/01");
    }

    // -- week_window ----------------------------------------------------------

    #[test]
    fn window_anchors_to_monday_midnight() {
        // Wednesday 2026-02-11 15:42 UTC -> Monday 2026-02-09 00:00 UTC.
        let (start, end) = week_window(ts(2026, 2, 11, 15, 42), 0, utc_offset());
        assert_eq!(start, ts(2026, 2, 9, 0, 0));
        assert_eq!(end, ts(2026, 2, 16, 0, 0));
    }

    #[test]
    fn monday_itself_anchors_to_same_day() {
        let (start, _) = week_window(ts(2026, 2, 9, 0, 0), 0, utc_offset());
        assert_eq!(start, ts(2026, 2, 9, 0, 0));
    }

    #[test]
    fn weeks_ahead_shifts_whole_weeks() {
        let (start, end) = week_window(ts(2026, 2, 11, 15, 42), 2, utc_offset());
        assert_eq!(start, ts(2026, 2, 23, 0, 0));
        assert_eq!(end, ts(2026, 3, 2, 0, 0));
    }

    #[test]
    fn window_uses_display_offset_for_day_boundary() {
        // 23:30 UTC Sunday 2026-02-08 is already Monday 02:30 at UTC+3,
        // so the target week starts 2026-02-09 00:00 local (= 2026-02-08
        // 21:00 UTC).
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let (start, _) = week_window(ts(2026, 2, 8, 23, 30), 0, plus_three);
        assert_eq!(start, ts(2026, 2, 8, 21, 0));
    }

    // -- validate_weeks_ahead -------------------------------------------------

    #[test]
    fn weeks_ahead_bounds() {
        assert!(validate_weeks_ahead(0).is_ok());
        assert!(validate_weeks_ahead(4).is_ok());
        assert!(validate_weeks_ahead(5).is_err());
    }

    // -- types_available ------------------------------------------------------

    #[test]
    fn types_are_deduplicated_and_sorted() {
        let types = ["Sport", "News", "Sport", "Culture"];
        assert_eq!(
            types_available(types.iter().copied()),
            vec!["Culture".to_string(), "News".to_string(), "Sport".to_string()]
        );
    }
}
