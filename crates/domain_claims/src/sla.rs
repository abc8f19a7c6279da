//! SLA deadline computation
//!
//! Priority maps to a business-day offset; the due date is reached by
//! walking forward from the submission instant, counting only weekdays.

use chrono::{DateTime, Utc};

use core_kernel::calendar::add_business_days;

use crate::claim::Priority;

/// Business days allowed for each priority
pub fn business_day_offset(priority: Priority) -> u32 {
    match priority {
        Priority::Critical => 1,
        Priority::High => 3,
        Priority::Medium => 5,
        Priority::Low => 10,
    }
}

/// Computes the SLA due date for a claim submitted at `submitted_at`
pub fn due_date(priority: Priority, submitted_at: DateTime<Utc>) -> DateTime<Utc> {
    add_business_days(submitted_at, business_day_offset(priority))
}

/// Returns true once `now` is past the due date
pub fn is_breached(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > due
}
