//! Status history ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::UserId;

use crate::claim::ClaimStatus;

/// One status change of a claim
///
/// Rows are append-only: they are written exactly once per transition and
/// never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimStatusHistory {
    pub from_status: ClaimStatus,
    pub to_status: ClaimStatus,
    pub changed_by: UserId,
    pub comment: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl ClaimStatusHistory {
    /// Records a transition performed by `changed_by` at `changed_at`
    pub fn record(
        from_status: ClaimStatus,
        to_status: ClaimStatus,
        changed_by: UserId,
        comment: Option<String>,
        changed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            from_status,
            to_status,
            changed_by,
            comment,
            changed_at,
        }
    }
}
