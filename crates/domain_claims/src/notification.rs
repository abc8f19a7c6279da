//! In-app notifications and the status-change content table

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{ClaimId, NotificationId, UserId};

use crate::claim::{Claim, ClaimStatus};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    ClaimSubmitted,
    ClaimApproved,
    ClaimRejected,
    ClaimPaid,
    ApprovalRequired,
    SlaBreach,
    DocumentRequired,
    ClaimUpdate,
}

/// A notification persisted for a user
///
/// Created by the lifecycle core and the escalation monitor; the read flag
/// is flipped by the notification-reading collaborator, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNotification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_claim: Option<ClaimId>,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A notification the core wants dispatched
///
/// Side-effect plans carry these; the notification port turns them into
/// persisted [`UserNotification`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_claim: Option<ClaimId>,
}

/// Content for one destination status
struct StatusContent {
    title: &'static str,
    kind: NotificationKind,
    message: fn(&Claim) -> String,
}

/// Owner-facing content keyed by the destination status of a transition
///
/// Only these five destinations notify the owner; every other destination
/// is deliberately absent (see the completeness test below).
static STATUS_CONTENT: Lazy<HashMap<ClaimStatus, StatusContent>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        ClaimStatus::UnderReview,
        StatusContent {
            title: "Claim Under Review",
            kind: NotificationKind::ClaimUpdate,
            message: |c| format!("Your claim {} is now under review by our team.", c.claim_number),
        },
    );
    table.insert(
        ClaimStatus::Approved,
        StatusContent {
            title: "Claim Approved",
            kind: NotificationKind::ClaimApproved,
            message: |c| {
                format!(
                    "Great news! Your claim {} for {} has been approved.",
                    c.claim_number, c.amount
                )
            },
        },
    );
    table.insert(
        ClaimStatus::Rejected,
        StatusContent {
            title: "Claim Rejected",
            kind: NotificationKind::ClaimRejected,
            message: |c| {
                format!(
                    "Your claim {} has been rejected. Please check the comments for details.",
                    c.claim_number
                )
            },
        },
    );
    table.insert(
        ClaimStatus::Paid,
        StatusContent {
            title: "Payment Processed",
            kind: NotificationKind::ClaimPaid,
            message: |c| {
                format!(
                    "Payment of {} for claim {} has been processed.",
                    c.amount, c.claim_number
                )
            },
        },
    );
    table.insert(
        ClaimStatus::MoreInfoRequired,
        StatusContent {
            title: "Additional Information Required",
            kind: NotificationKind::DocumentRequired,
            message: |c| format!("Your claim {} requires additional information.", c.claim_number),
        },
    );
    table
});

/// Destinations that produce an owner notification
pub fn notifying_destinations() -> Vec<ClaimStatus> {
    STATUS_CONTENT.keys().copied().collect()
}

/// Owner notification for a claim that just transitioned into its current
/// status; None for destinations outside the content table
pub fn owner_notification(claim: &Claim) -> Option<NotificationRequest> {
    STATUS_CONTENT.get(&claim.status).map(|content| NotificationRequest {
        recipient: claim.owner_id,
        kind: content.kind,
        title: content.title.to_string(),
        message: (content.message)(claim),
        related_claim: Some(claim.id),
    })
}

/// Process reminder for the agent who moved a claim into review
pub fn review_reminder(claim: &Claim, agent: UserId) -> NotificationRequest {
    NotificationRequest {
        recipient: agent,
        kind: NotificationKind::ApprovalRequired,
        title: "Claim Requires Review".to_string(),
        message: format!(
            "Claim {} is now under review and requires your attention.",
            claim.claim_number
        ),
        related_claim: Some(claim.id),
    }
}

/// Confirmation sent to the owner right after submission
pub fn submission_notification(claim: &Claim) -> NotificationRequest {
    NotificationRequest {
        recipient: claim.owner_id,
        kind: NotificationKind::ClaimSubmitted,
        title: "Claim Submitted Successfully".to_string(),
        message: format!(
            "Your claim {} has been submitted and is awaiting review.",
            claim.claim_number
        ),
        related_claim: Some(claim.id),
    }
}

/// Owner alert once the SLA deadline has been missed
pub fn breach_notification(claim: &Claim) -> NotificationRequest {
    NotificationRequest {
        recipient: claim.owner_id,
        kind: NotificationKind::SlaBreach,
        title: "SLA Breach Alert".to_string(),
        message: format!(
            "Your claim {} has exceeded the expected processing time. \
             We are working to resolve this as soon as possible.",
            claim.claim_number
        ),
        related_claim: Some(claim.id),
    }
}

/// Owner warning while the deadline is still ahead but close
pub fn warning_notification(claim: &Claim) -> NotificationRequest {
    NotificationRequest {
        recipient: claim.owner_id,
        kind: NotificationKind::SlaBreach,
        title: "SLA Warning".to_string(),
        message: format!(
            "Your claim {} is approaching its SLA deadline.",
            claim.claim_number
        ),
        related_claim: Some(claim.id),
    }
}
