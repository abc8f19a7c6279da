//! Status transition engine
//!
//! The single authority on which status changes are legal. Nothing else in
//! the system writes `Claim::status`; the lifecycle service and the
//! escalation monitor both come through here.

use chrono::{DateTime, Utc};

use core_kernel::UserId;

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::history::ClaimStatusHistory;
use crate::notification::{owner_notification, review_reminder, NotificationRequest};
use crate::ports::{AuditAction, AuditRequest};

/// Destinations reachable from the given status
///
/// Rejected, Paid, and Cancelled are terminal. Cancellation is only
/// reachable before review starts.
pub fn allowed_transitions(from: ClaimStatus) -> &'static [ClaimStatus] {
    match from {
        ClaimStatus::Draft => &[ClaimStatus::Submitted, ClaimStatus::Cancelled],
        ClaimStatus::Submitted => &[
            ClaimStatus::UnderReview,
            ClaimStatus::Rejected,
            ClaimStatus::Cancelled,
        ],
        ClaimStatus::UnderReview => &[
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
            ClaimStatus::MoreInfoRequired,
        ],
        ClaimStatus::MoreInfoRequired => &[ClaimStatus::UnderReview, ClaimStatus::Rejected],
        ClaimStatus::Approved => &[ClaimStatus::Paid],
        ClaimStatus::Rejected | ClaimStatus::Paid | ClaimStatus::Cancelled => &[],
    }
}

/// Checks that `requested` is reachable from `current`
///
/// This check is mandatory before any mutation; it is the only place that
/// interprets the transition table.
pub fn validate_transition(
    current: ClaimStatus,
    requested: ClaimStatus,
) -> Result<(), ClaimError> {
    if allowed_transitions(current).contains(&requested) {
        Ok(())
    } else {
        Err(ClaimError::InvalidTransition {
            from: current,
            to: requested,
        })
    }
}

/// The side effects a successful transition asks the caller to dispatch
///
/// The mutation and its history entry have already been applied to the
/// claim when this is returned; dispatching the plan is best-effort and
/// must never roll the mutation back.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub notifications: Vec<NotificationRequest>,
    pub audit: AuditRequest,
}

/// Validates and applies a transition to the claim in memory
///
/// On success the claim's status is updated, `approved_at`/`paid_at` are
/// stamped where the destination calls for it, a history row is appended,
/// and the side-effect plan is returned. On failure the claim is untouched.
pub fn apply_transition(
    claim: &mut Claim,
    to: ClaimStatus,
    actor: UserId,
    comment: Option<String>,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome, ClaimError> {
    validate_transition(claim.status, to)?;

    let from = claim.status;
    claim.status = to;
    claim.updated_at = Some(now);

    match to {
        ClaimStatus::Approved => claim.approved_at = Some(now),
        ClaimStatus::Paid => claim.paid_at = Some(now),
        _ => {}
    }

    claim.status_history.push(ClaimStatusHistory::record(
        from,
        to,
        actor,
        comment.clone(),
        now,
    ));

    let mut notifications = Vec::new();
    if let Some(notification) = owner_notification(claim) {
        notifications.push(notification);
    }
    if to == ClaimStatus::UnderReview {
        notifications.push(review_reminder(claim, actor));
    }

    let mut details = format!("Status changed from {from} to {to}");
    if let Some(comment) = &comment {
        details.push_str(&format!(". Comments: {comment}"));
    }
    let audit = AuditRequest {
        claim_id: claim.id,
        actor,
        action: AuditAction::StatusChanged,
        details,
    };

    Ok(TransitionOutcome {
        from,
        to,
        notifications,
        audit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{ClaimType, CreateClaimRequest, Priority};
    use crate::notification::NotificationKind;
    use chrono::TimeZone;
    use core_kernel::{CategoryId, Currency, Money};
    use rust_decimal_macros::dec;

    fn claim_in(status: ClaimStatus) -> Claim {
        let now = Utc.with_ymd_and_hms(2024, 12, 3, 10, 0, 0).unwrap();
        let mut claim = Claim::submit(
            CreateClaimRequest {
                claim_type: ClaimType::Medical,
                category_id: CategoryId::new_v7(),
                title: "Physio sessions".to_string(),
                description: "Six sessions after the skiing accident".to_string(),
                amount: Money::new(dec!(850), Currency::USD),
                priority: Priority::High,
                incident_date: None,
            },
            UserId::new_v7(),
            "CLM2024120002".to_string(),
            now + chrono::Duration::days(5),
            now,
        );
        claim.status = status;
        claim
    }

    fn transition_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 4, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_full_transition_matrix() {
        use ClaimStatus::*;

        let legal: &[(ClaimStatus, ClaimStatus)] = &[
            (Draft, Submitted),
            (Draft, Cancelled),
            (Submitted, UnderReview),
            (Submitted, Rejected),
            (Submitted, Cancelled),
            (UnderReview, Approved),
            (UnderReview, Rejected),
            (UnderReview, MoreInfoRequired),
            (MoreInfoRequired, UnderReview),
            (MoreInfoRequired, Rejected),
            (Approved, Paid),
        ];

        for from in ClaimStatus::ALL {
            for to in ClaimStatus::ALL {
                let expected = legal.contains(&(from, to));
                let actual = validate_transition(from, to).is_ok();
                assert_eq!(actual, expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_exits() {
        for terminal in [
            ClaimStatus::Rejected,
            ClaimStatus::Paid,
            ClaimStatus::Cancelled,
        ] {
            assert!(allowed_transitions(terminal).is_empty(), "{terminal}");
        }
    }

    #[test]
    fn test_invalid_transition_carries_both_statuses() {
        let err = validate_transition(ClaimStatus::Approved, ClaimStatus::UnderReview).unwrap_err();
        match err {
            ClaimError::InvalidTransition { from, to } => {
                assert_eq!(from, ClaimStatus::Approved);
                assert_eq!(to, ClaimStatus::UnderReview);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_apply_appends_history_row() {
        let mut claim = claim_in(ClaimStatus::UnderReview);
        let actor = UserId::new_v7();
        let now = transition_instant();

        let outcome = apply_transition(
            &mut claim,
            ClaimStatus::Approved,
            actor,
            Some("looks good".to_string()),
            now,
        )
        .unwrap();

        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(outcome.from, ClaimStatus::UnderReview);
        assert_eq!(claim.status_history.len(), 1);

        let entry = claim.latest_history().unwrap();
        assert_eq!(entry.from_status, ClaimStatus::UnderReview);
        assert_eq!(entry.to_status, ClaimStatus::Approved);
        assert_eq!(entry.changed_by, actor);
        assert_eq!(entry.comment.as_deref(), Some("looks good"));
        assert_eq!(entry.changed_at, now);
    }

    #[test]
    fn test_approved_stamps_approved_at() {
        let mut claim = claim_in(ClaimStatus::UnderReview);
        let now = transition_instant();

        apply_transition(&mut claim, ClaimStatus::Approved, UserId::new_v7(), None, now).unwrap();

        assert_eq!(claim.approved_at, Some(now));
        assert!(claim.paid_at.is_none());
    }

    #[test]
    fn test_paid_stamps_paid_at() {
        let mut claim = claim_in(ClaimStatus::Approved);
        let now = transition_instant();

        apply_transition(&mut claim, ClaimStatus::Paid, UserId::new_v7(), None, now).unwrap();

        assert_eq!(claim.paid_at, Some(now));
    }

    #[test]
    fn test_failed_transition_leaves_claim_untouched() {
        let mut claim = claim_in(ClaimStatus::Approved);
        let before = claim.clone();

        let result = apply_transition(
            &mut claim,
            ClaimStatus::UnderReview,
            UserId::new_v7(),
            None,
            transition_instant(),
        );

        assert!(matches!(result, Err(ClaimError::InvalidTransition { .. })));
        assert_eq!(claim.status, before.status);
        assert_eq!(claim.status_history.len(), before.status_history.len());
        assert_eq!(claim.updated_at, before.updated_at);
    }

    #[test]
    fn test_under_review_plans_owner_and_agent_notifications() {
        let mut claim = claim_in(ClaimStatus::Submitted);
        let actor = UserId::new_v7();

        let outcome = apply_transition(
            &mut claim,
            ClaimStatus::UnderReview,
            actor,
            None,
            transition_instant(),
        )
        .unwrap();

        assert_eq!(outcome.notifications.len(), 2);
        assert_eq!(outcome.notifications[0].recipient, claim.owner_id);
        assert_eq!(outcome.notifications[0].kind, NotificationKind::ClaimUpdate);
        assert_eq!(outcome.notifications[1].recipient, actor);
        assert_eq!(
            outcome.notifications[1].kind,
            NotificationKind::ApprovalRequired
        );
    }

    #[test]
    fn test_cancellation_plans_no_owner_notification() {
        let mut claim = claim_in(ClaimStatus::Submitted);
        let owner_id = claim.owner_id;

        let outcome = apply_transition(
            &mut claim,
            ClaimStatus::Cancelled,
            owner_id,
            None,
            transition_instant(),
        )
        .unwrap();

        assert!(outcome.notifications.is_empty());
        assert_eq!(claim.status, ClaimStatus::Cancelled);
    }

    #[test]
    fn test_audit_details_include_comment() {
        let mut claim = claim_in(ClaimStatus::UnderReview);

        let outcome = apply_transition(
            &mut claim,
            ClaimStatus::Rejected,
            UserId::new_v7(),
            Some("receipts missing".to_string()),
            transition_instant(),
        )
        .unwrap();

        assert_eq!(outcome.audit.action, AuditAction::StatusChanged);
        assert_eq!(
            outcome.audit.details,
            "Status changed from Under Review to Rejected. Comments: receipts missing"
        );
    }
}
