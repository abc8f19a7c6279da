//! Property-based tests for the pure policy functions

use chrono::{Datelike, Duration, TimeZone, Utc, Weekday};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_claims::approval::{approval_level, requires_approval};
use domain_claims::sla;
use domain_claims::transition::allowed_transitions;

use test_utils::generators::{
    claim_amount_strategy, oversized_amount_strategy, priority_strategy, status_strategy,
};

proptest! {
    #[test]
    fn sla_due_date_is_a_weekday_after_submission(
        priority in priority_strategy(),
        day_offset in 0i64..2000i64,
        minutes in 0i64..1440i64
    ) {
        let submitted = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
            + Duration::days(day_offset)
            + Duration::minutes(minutes);

        let due = sla::due_date(priority, submitted);

        prop_assert!(due > submitted);
        prop_assert!(!matches!(due.weekday(), Weekday::Sat | Weekday::Sun));

        // The gap always covers the business-day offset in calendar days
        let offset = sla::business_day_offset(priority) as i64;
        prop_assert!(due - submitted >= Duration::days(offset));
    }

    #[test]
    fn every_claim_amount_lands_in_a_tier(amount in claim_amount_strategy()) {
        let level = approval_level(&amount);
        prop_assert!((1..=4).contains(&level));

        // The tier boundaries partition cleanly
        let expected = if amount.amount() <= dec!(1000) {
            1
        } else if amount.amount() <= dec!(5000) {
            2
        } else if amount.amount() <= dec!(10000) {
            3
        } else {
            4
        };
        prop_assert_eq!(level, expected);
    }

    #[test]
    fn oversized_amounts_always_require_approval(amount in oversized_amount_strategy()) {
        prop_assert!(requires_approval(&amount, None));
        let limit = Money::new(dec!(500), Currency::USD);
        prop_assert!(requires_approval(&amount, Some(&limit)));
        prop_assert_eq!(approval_level(&amount), 4);
    }

    #[test]
    fn terminal_statuses_never_have_exits(status in status_strategy()) {
        let exits = allowed_transitions(status);
        if status.is_terminal() {
            prop_assert!(exits.is_empty());
        } else {
            prop_assert!(!exits.is_empty());
        }
    }
}
