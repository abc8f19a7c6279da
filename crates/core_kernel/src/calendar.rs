//! Business-day calendar arithmetic
//!
//! Deadline computations count only weekdays; Saturdays and Sundays never
//! count toward an offset. All arithmetic is performed in UTC.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Returns true if the given instant falls on a weekday
pub fn is_business_day(instant: DateTime<Utc>) -> bool {
    !matches!(instant.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances from `start` by `business_days` weekdays
///
/// Walks forward one calendar day at a time, counting a day only when it
/// lands on a weekday. The time-of-day component of `start` is preserved.
pub fn add_business_days(start: DateTime<Utc>, business_days: u32) -> DateTime<Utc> {
    let mut current = start;
    let mut added = 0;

    while added < business_days {
        current += Duration::days(1);
        if is_business_day(current) {
            added += 1;
        }
    }

    current
}

/// Counts the weekdays between `start` (inclusive) and `end` (exclusive)
pub fn business_days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let mut days = 0;
    let mut current = start;

    while current < end {
        if is_business_day(current) {
            days += 1;
        }
        current += Duration::days(1);
    }

    days
}

/// Returns the next weekday strictly after the given instant
pub fn next_business_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let mut next = instant + Duration::days(1);
    while !is_business_day(next) {
        next += Duration::days(1);
    }
    next
}
