//! Claims domain errors

use thiserror::Error;

use core_kernel::{CategoryId, ClaimId, PortError};

use crate::claim::ClaimStatus;

/// Errors surfaced by the claims lifecycle
///
/// Every failure a caller can see is one of these variants; adapter errors
/// are normalized into `Storage` rather than leaking through untyped.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown or inactive expense category: {0}")]
    InvalidCategory(CategoryId),

    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("Duplicate claim number: {0}")]
    DuplicateClaimNumber(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] PortError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    /// Returns true for failures the caller caused; retrying the same
    /// request cannot succeed
    pub fn is_deterministic(&self) -> bool {
        matches!(
            self,
            ClaimError::Validation(_)
                | ClaimError::InvalidCategory(_)
                | ClaimError::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message_names_both_statuses() {
        let err = ClaimError::InvalidTransition {
            from: ClaimStatus::Approved,
            to: ClaimStatus::UnderReview,
        };
        let message = err.to_string();
        assert!(message.contains("Approved"));
        assert!(message.contains("Under Review"));
    }

    #[test]
    fn test_deterministic_classification() {
        assert!(ClaimError::validation("bad title").is_deterministic());
        assert!(ClaimError::InvalidTransition {
            from: ClaimStatus::Paid,
            to: ClaimStatus::Submitted,
        }
        .is_deterministic());
        assert!(!ClaimError::Storage(PortError::connection("db down")).is_deterministic());
        assert!(!ClaimError::DuplicateClaimNumber("CLM2024120001".into()).is_deterministic());
    }
}
