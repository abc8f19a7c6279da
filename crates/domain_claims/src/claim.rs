//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CategoryId, ClaimId, Money, UserId};

use crate::approval::ClaimApproval;
use crate::history::ClaimStatusHistory;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Being drafted, not yet submitted
    Draft,
    /// Submitted and awaiting triage
    Submitted,
    /// Under review by an agent
    UnderReview,
    /// Sent back to the owner for additional information
    MoreInfoRequired,
    /// Approved for payment
    Approved,
    /// Rejected
    Rejected,
    /// Payment processed
    Paid,
    /// Cancelled by the owner before review
    Cancelled,
}

impl ClaimStatus {
    /// Every status, for table-completeness checks
    pub const ALL: [ClaimStatus; 8] = [
        ClaimStatus::Draft,
        ClaimStatus::Submitted,
        ClaimStatus::UnderReview,
        ClaimStatus::MoreInfoRequired,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Paid,
        ClaimStatus::Cancelled,
    ];

    /// Human-readable name for display and audit details
    pub fn display_name(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "Draft",
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::MoreInfoRequired => "More Info Required",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Paid => "Paid",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }

    /// Returns true for statuses that end the lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Rejected | ClaimStatus::Paid | ClaimStatus::Cancelled
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Expense claim type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimType {
    Health,
    Auto,
    Property,
    Life,
    Disability,
    Travel,
    Medical,
}

/// Processing priority, drives the SLA due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input for submitting a new claim
///
/// The owner is passed separately by the caller; it comes from the
/// authenticated request context in the API layer, never from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClaimRequest {
    pub claim_type: ClaimType,
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    pub amount: Money,
    pub priority: Priority,
    pub incident_date: Option<DateTime<Utc>>,
}

/// An expense reimbursement claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Human-readable claim number, immutable once assigned
    pub claim_number: String,
    /// Owner (the employee who submitted the claim)
    pub owner_id: UserId,
    /// Claim type
    pub claim_type: ClaimType,
    /// Expense category
    pub category_id: CategoryId,
    /// Short title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Claimed amount
    pub amount: Money,
    /// Current lifecycle status
    pub status: ClaimStatus,
    /// Processing priority
    pub priority: Priority,
    /// When the expense was incurred
    pub incident_date: Option<DateTime<Utc>>,
    /// When the claim was submitted
    pub submitted_at: DateTime<Utc>,
    /// Stamped on transition into Approved
    pub approved_at: Option<DateTime<Utc>>,
    /// Stamped on transition into Paid
    pub paid_at: Option<DateTime<Utc>>,
    /// SLA deadline, computed once at submission
    pub sla_due_date: DateTime<Utc>,
    /// Set once the SLA deadline is breached; never reset
    pub escalated: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: Option<DateTime<Utc>>,
    /// Append-only status history
    pub status_history: Vec<ClaimStatusHistory>,
    /// Approval decisions, appended per action
    pub approvals: Vec<ClaimApproval>,
}

impl Claim {
    /// Creates a newly submitted claim
    ///
    /// Validation of the request happens in the lifecycle service before
    /// this constructor runs; the claim number and SLA due date are
    /// assigned by the caller.
    pub fn submit(
        request: CreateClaimRequest,
        owner_id: UserId,
        claim_number: String,
        sla_due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ClaimId::new_v7(),
            claim_number,
            owner_id,
            claim_type: request.claim_type,
            category_id: request.category_id,
            title: request.title,
            description: request.description,
            amount: request.amount,
            status: ClaimStatus::Submitted,
            priority: request.priority,
            incident_date: request.incident_date,
            submitted_at: now,
            approved_at: None,
            paid_at: None,
            sla_due_date,
            escalated: false,
            created_at: now,
            updated_at: None,
            status_history: Vec::new(),
            approvals: Vec::new(),
        }
    }

    /// Returns true while the claim is still in flight
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Owners may only edit drafts
    pub fn can_edit(&self) -> bool {
        self.status == ClaimStatus::Draft
    }

    /// Owners may cancel before review starts
    pub fn can_cancel(&self) -> bool {
        matches!(self.status, ClaimStatus::Draft | ClaimStatus::Submitted)
    }

    /// Marks the claim as escalated
    ///
    /// Monotonic: once set the flag survives every later mutation, which is
    /// what prevents a breach notification from being re-sent each sweep.
    pub fn escalate(&mut self, now: DateTime<Utc>) {
        if !self.escalated {
            self.escalated = true;
            self.updated_at = Some(now);
        }
    }

    /// Latest status history entry, if any
    pub fn latest_history(&self) -> Option<&ClaimStatusHistory> {
        self.status_history.last()
    }
}
