//! Pre-built Test Fixtures
//!
//! Ready-to-use test data, consistent and predictable across the suite.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{CategoryId, Currency, Money, UserId};
use domain_claims::category::ExpenseCategory;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The suite's canonical "now": Tuesday 2024-12-03 10:00 UTC
    pub fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 3, 10, 0, 0).unwrap()
    }

    /// A Friday afternoon, for weekend-rollover cases
    pub fn friday_afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 6, 16, 0, 0).unwrap()
    }
}

/// Fixture for deterministic identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// The claim owner used across tests
    pub fn owner() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x01))
    }

    /// An agent/reviewer
    pub fn agent() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x02))
    }

    /// A manager/approver
    pub fn manager() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x03))
    }

    /// The default expense category id
    pub fn travel_category() -> CategoryId {
        CategoryId::from_uuid(Uuid::from_u128(0x10))
    }

    /// A category without an amount limit
    pub fn unlimited_category() -> CategoryId {
        CategoryId::from_uuid(Uuid::from_u128(0x11))
    }

    /// A category flagged inactive
    pub fn retired_category() -> CategoryId {
        CategoryId::from_uuid(Uuid::from_u128(0x12))
    }
}

/// Fixture for expense categories
pub struct CategoryFixtures;

impl CategoryFixtures {
    /// Travel category with a $500 limit
    pub fn travel() -> ExpenseCategory {
        ExpenseCategory {
            id: IdFixtures::travel_category(),
            name: "Travel".to_string(),
            description: Some("Flights, trains, taxis, and lodging".to_string()),
            max_amount: Some(Money::new(dec!(500), Currency::USD)),
            requires_approval: true,
            is_active: true,
            created_at: TemporalFixtures::test_now(),
        }
    }

    /// Category without a configured maximum
    pub fn unlimited() -> ExpenseCategory {
        ExpenseCategory {
            id: IdFixtures::unlimited_category(),
            name: "Equipment".to_string(),
            description: None,
            max_amount: None,
            requires_approval: true,
            is_active: true,
            created_at: TemporalFixtures::test_now(),
        }
    }

    /// Inactive category that must fail creation validation
    pub fn retired() -> ExpenseCategory {
        ExpenseCategory {
            id: IdFixtures::retired_category(),
            name: "Entertainment".to_string(),
            description: None,
            max_amount: Some(Money::new(dec!(200), Currency::USD)),
            requires_approval: true,
            is_active: false,
            created_at: TemporalFixtures::test_now(),
        }
    }

    /// Every fixture category, for seeding the memory port
    pub fn all() -> Vec<ExpenseCategory> {
        vec![Self::travel(), Self::unlimited(), Self::retired()]
    }
}

/// Fixture for money values
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// The standard small claim used by most scenarios
    pub fn usd_500() -> Money {
        Money::new(dec!(500), Currency::USD)
    }

    /// Just over the hard creation ceiling
    pub fn over_ceiling() -> Money {
        Money::new(dec!(100000.01), Currency::USD)
    }
}
