//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests only spell out the fields they care about.

use chrono::{DateTime, Utc};
use core_kernel::{CategoryId, Money, UserId};
use domain_claims::claim::{Claim, ClaimStatus, ClaimType, CreateClaimRequest, Priority};
use domain_claims::sla;

use crate::fixtures::{IdFixtures, MoneyFixtures, TemporalFixtures};

/// Builder for claims in arbitrary lifecycle states
///
/// Defaults to a freshly submitted $500 medium-priority travel claim from
/// the fixture owner, with the SLA due date the lifecycle would have
/// computed.
pub struct ClaimBuilder {
    claim_number: String,
    owner_id: UserId,
    claim_type: ClaimType,
    category_id: CategoryId,
    title: String,
    description: String,
    amount: Money,
    status: ClaimStatus,
    priority: Priority,
    incident_date: Option<DateTime<Utc>>,
    submitted_at: DateTime<Utc>,
    sla_due_date: Option<DateTime<Utc>>,
    escalated: bool,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            claim_number: "CLM2024120001".to_string(),
            owner_id: IdFixtures::owner(),
            claim_type: ClaimType::Travel,
            category_id: IdFixtures::travel_category(),
            title: "Client visit travel".to_string(),
            description: "Travel expenses for the Q4 client onsite".to_string(),
            amount: MoneyFixtures::usd_500(),
            status: ClaimStatus::Submitted,
            priority: Priority::Medium,
            incident_date: None,
            submitted_at: TemporalFixtures::test_now(),
            sla_due_date: None,
            escalated: false,
        }
    }

    pub fn with_claim_number(mut self, number: impl Into<String>) -> Self {
        self.claim_number = number.into();
        self
    }

    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner_id = owner;
        self
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category_id = category;
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = submitted_at;
        self
    }

    /// Overrides the computed SLA due date
    pub fn with_sla_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.sla_due_date = Some(due);
        self
    }

    pub fn escalated(mut self) -> Self {
        self.escalated = true;
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        let sla_due_date = self
            .sla_due_date
            .unwrap_or_else(|| sla::due_date(self.priority, self.submitted_at));

        let mut claim = Claim::submit(
            CreateClaimRequest {
                claim_type: self.claim_type,
                category_id: self.category_id,
                title: self.title,
                description: self.description,
                amount: self.amount,
                priority: self.priority,
                incident_date: self.incident_date,
            },
            self.owner_id,
            self.claim_number,
            sla_due_date,
            self.submitted_at,
        );
        claim.status = self.status;
        claim.escalated = self.escalated;
        claim
    }
}

/// Builder for creation requests fed to the lifecycle service
pub struct CreateClaimRequestBuilder {
    claim_type: ClaimType,
    category_id: CategoryId,
    title: String,
    description: String,
    amount: Money,
    priority: Priority,
    incident_date: Option<DateTime<Utc>>,
}

impl Default for CreateClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateClaimRequestBuilder {
    pub fn new() -> Self {
        Self {
            claim_type: ClaimType::Travel,
            category_id: IdFixtures::travel_category(),
            title: "Client visit travel".to_string(),
            description: "Travel expenses for the Q4 client onsite".to_string(),
            amount: MoneyFixtures::usd_500(),
            priority: Priority::Medium,
            incident_date: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category_id = category;
        self
    }

    pub fn with_incident_date(mut self, incident_date: DateTime<Utc>) -> Self {
        self.incident_date = Some(incident_date);
        self
    }

    pub fn build(self) -> CreateClaimRequest {
        CreateClaimRequest {
            claim_type: self.claim_type,
            category_id: self.category_id,
            title: self.title,
            description: self.description,
            amount: self.amount,
            priority: self.priority,
            incident_date: self.incident_date,
        }
    }
}

/// Convenience: a claim that breached its SLA yesterday, still Submitted
pub fn overdue_claim() -> Claim {
    let now = TemporalFixtures::test_now();
    ClaimBuilder::new()
        .with_sla_due_date(now - chrono::Duration::days(1))
        .build()
}

/// Convenience: a claim due within the warning window
pub fn nearly_due_claim(hours_until_due: i64) -> Claim {
    let now = TemporalFixtures::test_now();
    ClaimBuilder::new()
        .with_claim_number("CLM2024120002")
        .with_sla_due_date(now + chrono::Duration::hours(hours_until_due))
        .build()
}
