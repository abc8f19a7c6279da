//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use core_kernel::{Currency, Money};
use domain_claims::claim::{ClaimStatus, Priority};
use proptest::prelude::*;

/// Strategy for generating valid Priority values
pub fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Critical),
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low),
    ]
}

/// Strategy for generating any claim status
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Draft),
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::UnderReview),
        Just(ClaimStatus::MoreInfoRequired),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Paid),
        Just(ClaimStatus::Cancelled),
    ]
}

/// Strategy for claim amounts within the creation ceiling (in cents)
pub fn claim_amount_strategy() -> impl Strategy<Value = Money> {
    (1i64..=10_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for amounts that fail the creation ceiling
pub fn oversized_amount_strategy() -> impl Strategy<Value = Money> {
    (10_000_001i64..100_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}
