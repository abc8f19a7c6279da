//! Claim lifecycle orchestration
//!
//! `ClaimLifecycleService` receives intents from the API layer, validates
//! them, drives the transition engine, and dispatches side effects to the
//! notification/audit/email collaborators. Side-effect dispatch is
//! at-least-attempted: a failed dispatch is logged and never rolls back the
//! primary mutation.

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::{Clock, ClaimId, UserId};

use crate::approval::{approval_level, ApprovalDecision, ClaimApproval};
use crate::claim::{Claim, ClaimStatus, CreateClaimRequest};
use crate::claim_number::next_claim_number;
use crate::error::ClaimError;
use crate::notification::{submission_notification, NotificationRequest};
use crate::ports::{
    AuditAction, AuditPort, AuditRequest, ClaimsPort, EmailPort, EmailTemplate, NotificationPort,
    UserDirectoryPort,
};
use crate::transition::{apply_transition, validate_transition};

/// Hard ceiling on a single claim, in currency units
const MAX_CLAIM_AMOUNT: rust_decimal::Decimal = dec!(100000);
const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Orchestrates claim creation, status changes, and approvals
pub struct ClaimLifecycleService {
    claims: Arc<dyn ClaimsPort>,
    notifications: Arc<dyn NotificationPort>,
    audit: Arc<dyn AuditPort>,
    email: Arc<dyn EmailPort>,
    directory: Arc<dyn UserDirectoryPort>,
    clock: Arc<dyn Clock>,
}

impl ClaimLifecycleService {
    pub fn new(
        claims: Arc<dyn ClaimsPort>,
        notifications: Arc<dyn NotificationPort>,
        audit: Arc<dyn AuditPort>,
        email: Arc<dyn EmailPort>,
        directory: Arc<dyn UserDirectoryPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            claims,
            notifications,
            audit,
            email,
            directory,
            clock,
        }
    }

    /// Submits a new claim for the given owner
    ///
    /// Assigns the claim number, computes the SLA due date from the
    /// priority, persists the claim in `Submitted` status, and dispatches
    /// the submission notification, confirmation email, and audit entry.
    pub async fn create_claim(
        &self,
        request: CreateClaimRequest,
        owner_id: UserId,
    ) -> Result<Claim, ClaimError> {
        let now = self.clock.now();
        self.validate_create(&request, now).await?;

        let claim_number = next_claim_number(self.claims.as_ref(), self.clock.as_ref()).await?;
        let sla_due_date = crate::sla::due_date(request.priority, now);
        let mut claim = Claim::submit(request, owner_id, claim_number, sla_due_date, now);

        if let Err(err) = self.claims.insert_claim(&claim).await {
            if !err.is_conflict() {
                return Err(ClaimError::Storage(err));
            }
            // Lost the sequence race; regenerate once against the fresh
            // count before giving up.
            tracing::warn!(
                claim_number = %claim.claim_number,
                "claim number already taken, regenerating"
            );
            claim.claim_number =
                next_claim_number(self.claims.as_ref(), self.clock.as_ref()).await?;
            self.claims.insert_claim(&claim).await.map_err(|err| {
                if err.is_conflict() {
                    ClaimError::DuplicateClaimNumber(claim.claim_number.clone())
                } else {
                    ClaimError::Storage(err)
                }
            })?;
        }

        tracing::info!(
            claim_number = %claim.claim_number,
            owner = %owner_id,
            amount = %claim.amount,
            "claim created"
        );

        self.dispatch_notification(&submission_notification(&claim)).await;
        self.send_confirmation_email(&claim).await;
        self.dispatch_audit(&AuditRequest {
            claim_id: claim.id,
            actor: owner_id,
            action: AuditAction::ClaimCreated,
            details: format!("Claim created: {}, Amount: {}", claim.title, claim.amount),
        })
        .await;

        Ok(claim)
    }

    /// Moves a claim to a new status on behalf of `actor`
    ///
    /// The transition engine is the only authority on legality; on success
    /// the mutation and its history row are persisted as one unit before
    /// any side effect is dispatched.
    pub async fn change_status(
        &self,
        claim_id: ClaimId,
        new_status: ClaimStatus,
        actor: UserId,
        comment: Option<String>,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self
            .claims
            .get_claim(claim_id)
            .await?
            .ok_or(ClaimError::NotFound(claim_id))?;

        let outcome = apply_transition(&mut claim, new_status, actor, comment, self.clock.now())?;
        self.claims.update_claim(&claim).await?;

        tracing::info!(
            claim_number = %claim.claim_number,
            from = %outcome.from,
            to = %outcome.to,
            actor = %actor,
            "claim status changed"
        );

        for notification in &outcome.notifications {
            self.dispatch_notification(notification).await;
        }
        self.dispatch_audit(&outcome.audit).await;
        // Status-change emails are not wired up yet; only the in-app
        // notification is guaranteed.
        tracing::debug!(
            claim_number = %claim.claim_number,
            to = %outcome.to,
            "status update email skipped, template delivery not configured"
        );

        Ok(claim)
    }

    /// Claims waiting for a reviewer's decision, newest first
    pub async fn get_pending_approvals(&self, approver: UserId) -> Result<Vec<Claim>, ClaimError> {
        tracing::debug!(approver = %approver, "listing pending approvals");
        Ok(self.claims.claims_in_status(ClaimStatus::UnderReview).await?)
    }

    /// Records an approval decision and applies the induced status change
    ///
    /// The decision row is appended at the authority level derived from the
    /// claim amount; the status mutation itself still goes through the
    /// transition engine.
    pub async fn process_approval(
        &self,
        claim_id: ClaimId,
        decision: ApprovalDecision,
        approver: UserId,
        comment: Option<String>,
    ) -> Result<ClaimApproval, ClaimError> {
        let target = match decision {
            ApprovalDecision::Approved => ClaimStatus::Approved,
            ApprovalDecision::Rejected => ClaimStatus::Rejected,
            ApprovalDecision::Pending => {
                return Err(ClaimError::validation(
                    "Approval decision must be Approved or Rejected",
                ))
            }
        };

        let claim = self
            .claims
            .get_claim(claim_id)
            .await?
            .ok_or(ClaimError::NotFound(claim_id))?;
        validate_transition(claim.status, target)?;

        let approval = ClaimApproval::decide(
            claim_id,
            approver,
            decision,
            approval_level(&claim.amount),
            comment.clone(),
            self.clock.now(),
        );
        self.claims.record_approval(&approval).await?;
        self.dispatch_audit(&AuditRequest {
            claim_id,
            actor: approver,
            action: AuditAction::ApprovalRecorded,
            details: format!(
                "Approval level {} recorded: {:?}",
                approval.level, approval.decision
            ),
        })
        .await;

        self.change_status(claim_id, target, approver, comment).await?;
        Ok(approval)
    }

    /// Loads a claim, failing with `NotFound` when absent
    pub async fn get_claim(&self, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        self.claims
            .get_claim(claim_id)
            .await?
            .ok_or(ClaimError::NotFound(claim_id))
    }

    /// Looks a claim up by its human-readable number
    pub async fn get_claim_by_number(&self, number: &str) -> Result<Option<Claim>, ClaimError> {
        Ok(self.claims.find_by_number(number).await?)
    }

    /// Claims owned by the given user, newest first
    pub async fn claims_for_owner(&self, owner: UserId) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.claims.claims_for_owner(owner).await?)
    }

    /// Claims currently in the given status, newest first
    pub async fn claims_in_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.claims.claims_in_status(status).await?)
    }

    async fn validate_create(
        &self,
        request: &CreateClaimRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        if !request.amount.is_positive() || request.amount.amount() > MAX_CLAIM_AMOUNT {
            return Err(ClaimError::validation(
                "Claim amount must be positive and at most 100,000",
            ));
        }
        if request.title.trim().is_empty() || request.title.chars().count() > MAX_TITLE_CHARS {
            return Err(ClaimError::validation(
                "Title is required and must be at most 200 characters",
            ));
        }
        if request.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ClaimError::validation(
                "Description must be at most 2000 characters",
            ));
        }
        if let Some(incident_date) = request.incident_date {
            if incident_date > now {
                return Err(ClaimError::validation("Incident date cannot be in the future"));
            }
        }

        let category = self.claims.get_category(request.category_id).await?;
        match category {
            Some(category) if category.is_active => Ok(()),
            _ => Err(ClaimError::InvalidCategory(request.category_id)),
        }
    }

    async fn dispatch_notification(&self, request: &NotificationRequest) {
        let result = self
            .notifications
            .notify(
                request.recipient,
                &request.title,
                &request.message,
                request.kind,
                request.related_claim,
            )
            .await;
        if let Err(err) = result {
            tracing::warn!(
                recipient = %request.recipient,
                title = %request.title,
                error = %err,
                "failed to dispatch notification"
            );
        }
    }

    async fn dispatch_audit(&self, entry: &AuditRequest) {
        if let Err(err) = self.audit.record(entry).await {
            tracing::warn!(
                claim_id = %entry.claim_id,
                error = %err,
                "failed to record audit entry"
            );
        }
    }

    async fn send_confirmation_email(&self, claim: &Claim) {
        let address = match self.directory.email_for(claim.owner_id).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                tracing::warn!(
                    owner = %claim.owner_id,
                    claim_number = %claim.claim_number,
                    "owner email not found, skipping confirmation email"
                );
                return;
            }
            Err(err) => {
                tracing::warn!(error = %err, "user directory lookup failed");
                return;
            }
        };

        let params = HashMap::from([
            ("claim_number".to_string(), claim.claim_number.clone()),
            ("amount".to_string(), claim.amount.to_string()),
        ]);
        if let Err(err) = self
            .email
            .send_templated(&address, EmailTemplate::ClaimSubmitted, &params)
            .await
        {
            tracing::warn!(
                claim_number = %claim.claim_number,
                error = %err,
                "failed to send claim submitted email"
            );
        } else {
            tracing::info!(
                claim_number = %claim.claim_number,
                to = %address,
                "claim submitted email sent"
            );
        }
    }
}
