//! Approval policy and approval records
//!
//! The policy functions here are pure decision inputs: which authority tier
//! an amount falls into, and whether a category's limit forces a review.
//! Enforcing that a given tier requires a particular approver role is the
//! authorization layer's job, keyed off the level returned here.

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{ApprovalId, ClaimId, Money, UserId};

/// Decides whether a claim amount requires an approval step
///
/// A category without a configured maximum always requires approval (the
/// conservative default); otherwise only amounts above the maximum do.
pub fn requires_approval(amount: &Money, category_max: Option<&Money>) -> bool {
    match category_max {
        None => true,
        Some(max) => amount.exceeds(max),
    }
}

/// Maps a claim amount to its approval authority tier
///
/// Tiers: up to 1,000 -> 1, up to 5,000 -> 2, up to 10,000 -> 3,
/// anything larger -> 4.
pub fn approval_level(amount: &Money) -> u8 {
    let value = amount.amount();
    if value <= dec!(1000) {
        1
    } else if value <= dec!(5000) {
        2
    } else if value <= dec!(10000) {
        3
    } else {
        4
    }
}

/// Outcome of an approval action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalDecision {
    Pending,
    Approved,
    Rejected,
}

/// One approval decision on a claim
///
/// A second-level approval appends a new row; rows are never revised in
/// place, so the full decision trail is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimApproval {
    pub id: ApprovalId,
    pub claim_id: ClaimId,
    pub approver_id: UserId,
    pub decision: ApprovalDecision,
    /// Authority tier derived from the claim amount
    pub level: u8,
    pub comment: Option<String>,
    /// Set when the decision was made; None while Pending
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ClaimApproval {
    /// Records a decision made by `approver_id` at `now`
    pub fn decide(
        claim_id: ClaimId,
        approver_id: UserId,
        decision: ApprovalDecision,
        level: u8,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let decided_at = match decision {
            ApprovalDecision::Pending => None,
            _ => Some(now),
        };
        Self {
            id: ApprovalId::new_v7(),
            claim_id,
            approver_id,
            decision,
            level,
            comment,
            decided_at,
            created_at: now,
        }
    }
}
