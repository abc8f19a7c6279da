//! Claims Domain Ports
//!
//! Port interfaces for everything the lifecycle core needs from the outside
//! world: claim/category storage, the notification sink, the audit sink,
//! the email sink, and the user directory. Swappable implementations keep
//! the core testable without a database or SMTP server:
//!
//! - **Internal adapter**: a relational database in production
//! - **Mock adapter**: the in-memory implementations in [`mock`]
//!
//! The core relies on the storage adapter for two guarantees it cannot
//! provide itself: claim-number uniqueness (a unique index surfaced as
//! [`PortError::Conflict`]) and isolation of concurrent writes to the same
//! claim row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{CategoryId, ClaimId, DomainPort, PortError, UserId};

use crate::approval::ClaimApproval;
use crate::category::ExpenseCategory;
use crate::claim::{Claim, ClaimStatus};
use crate::notification::NotificationKind;

/// Actions recorded against the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    ClaimCreated,
    StatusChanged,
    ApprovalRecorded,
}

/// One audit entry the core wants recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub claim_id: ClaimId,
    pub actor: UserId,
    pub action: AuditAction,
    pub details: String,
}

/// Outbound email templates the core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailTemplate {
    ClaimSubmitted,
    StatusUpdate,
    SlaWarning,
    ApprovalRequest,
}

/// Storage port for claims, approvals, and category reference data
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Loads a claim by id
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Loads a claim by its human-readable number
    async fn find_by_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError>;

    /// Persists a new claim
    ///
    /// Fails with [`PortError::Conflict`] when the claim number already
    /// exists (the unique-index backstop for the sequence race).
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Persists changes to an existing claim
    async fn update_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Counts claims created within the given calendar month
    ///
    /// Must read from the same consistent view the subsequent insert writes
    /// to; the adapter serializes the read-then-increment or lets the
    /// unique index reject the loser.
    async fn count_claims_in_month(&self, year: i32, month: u32) -> Result<u64, PortError>;

    /// Claims whose SLA due date is at or before the threshold
    async fn claims_due_by(&self, threshold: DateTime<Utc>) -> Result<Vec<Claim>, PortError>;

    /// Claims currently in the given status, newest first
    async fn claims_in_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError>;

    /// Claims owned by the given user, newest first
    async fn claims_for_owner(&self, owner: UserId) -> Result<Vec<Claim>, PortError>;

    /// Appends an approval decision row
    async fn record_approval(&self, approval: &ClaimApproval) -> Result<(), PortError>;

    /// Approval rows for a claim, oldest first
    async fn approvals_for_claim(&self, claim: ClaimId) -> Result<Vec<ClaimApproval>, PortError>;

    /// Loads a category by id
    async fn get_category(&self, id: CategoryId) -> Result<Option<ExpenseCategory>, PortError>;
}

/// Notification sink; fire-and-forget from the core's perspective
#[async_trait]
pub trait NotificationPort: DomainPort {
    async fn notify(
        &self,
        user: UserId,
        title: &str,
        message: &str,
        kind: NotificationKind,
        related_claim: Option<ClaimId>,
    ) -> Result<(), PortError>;
}

/// Audit sink
#[async_trait]
pub trait AuditPort: DomainPort {
    async fn record(&self, entry: &AuditRequest) -> Result<(), PortError>;
}

/// Email sink; best-effort, the caller logs and swallows failures
#[async_trait]
pub trait EmailPort: DomainPort {
    async fn send_templated(
        &self,
        to: &str,
        template: EmailTemplate,
        params: &HashMap<String, String>,
    ) -> Result<(), PortError>;
}

/// Read-only directory lookup for user contact details
#[async_trait]
pub trait UserDirectoryPort: DomainPort {
    async fn email_for(&self, user: UserId) -> Result<Option<String>, PortError>;
}

/// In-memory adapters for testing and the demo worker runtime
///
/// `MemoryClaimsPort` enforces the claim-number unique index the way a
/// database would; the recording sinks capture every dispatch for
/// assertions and can be switched to fail to exercise the swallow path.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Datelike;
    use core_kernel::NotificationId;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    use crate::notification::UserNotification;

    /// In-memory claims store with a claim-number unique index
    #[derive(Debug, Default)]
    pub struct MemoryClaimsPort {
        claims: RwLock<HashMap<ClaimId, Claim>>,
        approvals: RwLock<Vec<ClaimApproval>>,
        categories: RwLock<HashMap<CategoryId, ExpenseCategory>>,
    }

    impl MemoryClaimsPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates category reference data
        pub async fn with_categories(categories: Vec<ExpenseCategory>) -> Self {
            let port = Self::new();
            {
                let mut map = port.categories.write().await;
                for category in categories {
                    map.insert(category.id, category);
                }
            }
            port
        }

        /// Seeds a claim directly, bypassing the lifecycle (test setup only)
        pub async fn seed_claim(&self, claim: Claim) {
            self.claims.write().await.insert(claim.id, claim);
        }

        /// Adds a category after construction
        pub async fn seed_category(&self, category: ExpenseCategory) {
            self.categories.write().await.insert(category.id, category);
        }

        pub async fn claim_count(&self) -> usize {
            self.claims.read().await.len()
        }
    }

    impl DomainPort for MemoryClaimsPort {}

    #[async_trait]
    impl ClaimsPort for MemoryClaimsPort {
        async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            Ok(self.claims.read().await.get(&id).cloned())
        }

        async fn find_by_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .find(|c| c.claim_number == claim_number)
                .cloned())
        }

        async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            if claims
                .values()
                .any(|existing| existing.claim_number == claim.claim_number)
            {
                return Err(PortError::conflict(format!(
                    "duplicate claim number {}",
                    claim.claim_number
                )));
            }
            if claims.contains_key(&claim.id) {
                return Err(PortError::conflict(format!("duplicate claim id {}", claim.id)));
            }
            claims.insert(claim.id, claim.clone());
            Ok(())
        }

        async fn update_claim(&self, claim: &Claim) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            if !claims.contains_key(&claim.id) {
                return Err(PortError::not_found("Claim", claim.id));
            }
            claims.insert(claim.id, claim.clone());
            Ok(())
        }

        async fn count_claims_in_month(&self, year: i32, month: u32) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.created_at.year() == year && c.created_at.month() == month)
                .count() as u64)
        }

        async fn claims_due_by(&self, threshold: DateTime<Utc>) -> Result<Vec<Claim>, PortError> {
            let mut due: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.sla_due_date <= threshold)
                .cloned()
                .collect();
            due.sort_by_key(|c| c.sla_due_date);
            Ok(due)
        }

        async fn claims_in_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
            let mut matching: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.status == status)
                .cloned()
                .collect();
            matching.sort_by_key(|c| std::cmp::Reverse(c.created_at));
            Ok(matching)
        }

        async fn claims_for_owner(&self, owner: UserId) -> Result<Vec<Claim>, PortError> {
            let mut owned: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.owner_id == owner)
                .cloned()
                .collect();
            owned.sort_by_key(|c| std::cmp::Reverse(c.created_at));
            Ok(owned)
        }

        async fn record_approval(&self, approval: &ClaimApproval) -> Result<(), PortError> {
            self.approvals.write().await.push(approval.clone());
            Ok(())
        }

        async fn approvals_for_claim(
            &self,
            claim: ClaimId,
        ) -> Result<Vec<ClaimApproval>, PortError> {
            Ok(self
                .approvals
                .read()
                .await
                .iter()
                .filter(|a| a.claim_id == claim)
                .cloned()
                .collect())
        }

        async fn get_category(&self, id: CategoryId) -> Result<Option<ExpenseCategory>, PortError> {
            Ok(self.categories.read().await.get(&id).cloned())
        }
    }

    /// Notification sink that persists rows in memory
    #[derive(Debug, Default)]
    pub struct RecordingNotificationPort {
        sent: RwLock<Vec<UserNotification>>,
        fail: AtomicBool,
    }

    impl RecordingNotificationPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent dispatch fail
        pub fn fail_next_dispatches(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub async fn sent(&self) -> Vec<UserNotification> {
            self.sent.read().await.clone()
        }

        pub async fn sent_to(&self, user: UserId) -> Vec<UserNotification> {
            self.sent
                .read()
                .await
                .iter()
                .filter(|n| n.user_id == user)
                .cloned()
                .collect()
        }
    }

    impl DomainPort for RecordingNotificationPort {}

    #[async_trait]
    impl NotificationPort for RecordingNotificationPort {
        async fn notify(
            &self,
            user: UserId,
            title: &str,
            message: &str,
            kind: NotificationKind,
            related_claim: Option<ClaimId>,
        ) -> Result<(), PortError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PortError::connection("notification sink unavailable"));
            }
            self.sent.write().await.push(UserNotification {
                id: NotificationId::new_v7(),
                user_id: user,
                kind,
                title: title.to_string(),
                message: message.to_string(),
                related_claim,
                read: false,
                read_at: None,
                created_at: Utc::now(),
            });
            Ok(())
        }
    }

    /// Audit sink that records every entry
    #[derive(Debug, Default)]
    pub struct RecordingAuditPort {
        entries: RwLock<Vec<AuditRequest>>,
    }

    impl RecordingAuditPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn entries(&self) -> Vec<AuditRequest> {
            self.entries.read().await.clone()
        }
    }

    impl DomainPort for RecordingAuditPort {}

    #[async_trait]
    impl AuditPort for RecordingAuditPort {
        async fn record(&self, entry: &AuditRequest) -> Result<(), PortError> {
            self.entries.write().await.push(entry.clone());
            Ok(())
        }
    }

    /// An email captured by the recording sink
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentEmail {
        pub to: String,
        pub template: EmailTemplate,
        pub params: HashMap<String, String>,
    }

    /// Email sink that records every send
    #[derive(Debug, Default)]
    pub struct RecordingEmailPort {
        sent: RwLock<Vec<SentEmail>>,
        fail: AtomicBool,
    }

    impl RecordingEmailPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent send fail
        pub fn fail_next_sends(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub async fn sent(&self) -> Vec<SentEmail> {
            self.sent.read().await.clone()
        }
    }

    impl DomainPort for RecordingEmailPort {}

    #[async_trait]
    impl EmailPort for RecordingEmailPort {
        async fn send_templated(
            &self,
            to: &str,
            template: EmailTemplate,
            params: &HashMap<String, String>,
        ) -> Result<(), PortError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PortError::connection("smtp relay unavailable"));
            }
            self.sent.write().await.push(SentEmail {
                to: to.to_string(),
                template,
                params: params.clone(),
            });
            Ok(())
        }
    }

    /// Directory backed by a fixed map of user emails
    #[derive(Debug, Default)]
    pub struct StaticUserDirectory {
        emails: HashMap<UserId, String>,
    }

    impl StaticUserDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_email(mut self, user: UserId, email: impl Into<String>) -> Self {
            self.emails.insert(user, email.into());
            self
        }
    }

    impl DomainPort for StaticUserDirectory {}

    #[async_trait]
    impl UserDirectoryPort for StaticUserDirectory {
        async fn email_for(&self, user: UserId) -> Result<Option<String>, PortError> {
            Ok(self.emails.get(&user).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use crate::claim::{ClaimType, CreateClaimRequest, Priority};
    use chrono::TimeZone;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    fn sample_claim(number: &str) -> Claim {
        let now = Utc.with_ymd_and_hms(2024, 12, 3, 10, 0, 0).unwrap();
        Claim::submit(
            CreateClaimRequest {
                claim_type: ClaimType::Travel,
                category_id: CategoryId::new_v7(),
                title: "Train tickets".to_string(),
                description: "Regional travel".to_string(),
                amount: Money::new(dec!(75), Currency::USD),
                priority: Priority::Low,
                incident_date: None,
            },
            UserId::new_v7(),
            number.to_string(),
            now + chrono::Duration::days(14),
            now,
        )
    }

    #[tokio::test]
    async fn test_memory_port_insert_and_get() {
        let port = MemoryClaimsPort::new();
        let claim = sample_claim("CLM2024120001");

        port.insert_claim(&claim).await.unwrap();

        let loaded = port.get_claim(claim.id).await.unwrap().unwrap();
        assert_eq!(loaded.claim_number, "CLM2024120001");
    }

    #[tokio::test]
    async fn test_memory_port_rejects_duplicate_number() {
        let port = MemoryClaimsPort::new();
        port.insert_claim(&sample_claim("CLM2024120001")).await.unwrap();

        let result = port.insert_claim(&sample_claim("CLM2024120001")).await;

        assert!(matches!(result, Err(ref e) if e.is_conflict()));
        assert_eq!(port.claim_count().await, 1);
    }

    #[tokio::test]
    async fn test_memory_port_count_scopes_to_month() {
        let port = MemoryClaimsPort::new();
        let mut december = sample_claim("CLM2024120001");
        december.created_at = Utc.with_ymd_and_hms(2024, 12, 5, 9, 0, 0).unwrap();
        let mut november = sample_claim("CLM2024110001");
        november.created_at = Utc.with_ymd_and_hms(2024, 11, 5, 9, 0, 0).unwrap();

        port.insert_claim(&december).await.unwrap();
        port.insert_claim(&november).await.unwrap();

        assert_eq!(port.count_claims_in_month(2024, 12).await.unwrap(), 1);
        assert_eq!(port.count_claims_in_month(2024, 11).await.unwrap(), 1);
        assert_eq!(port.count_claims_in_month(2024, 10).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_memory_port_claims_due_by_orders_by_due_date() {
        let port = MemoryClaimsPort::new();
        let base = Utc.with_ymd_and_hms(2024, 12, 3, 10, 0, 0).unwrap();

        let mut later = sample_claim("CLM2024120001");
        later.sla_due_date = base + chrono::Duration::days(2);
        let mut sooner = sample_claim("CLM2024120002");
        sooner.sla_due_date = base + chrono::Duration::days(1);

        port.insert_claim(&later).await.unwrap();
        port.insert_claim(&sooner).await.unwrap();

        let due = port
            .claims_due_by(base + chrono::Duration::days(3))
            .await
            .unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].claim_number, "CLM2024120002");

        let none_due = port.claims_due_by(base).await.unwrap();
        assert!(none_due.is_empty());
    }

    #[tokio::test]
    async fn test_recording_notification_port_failure_toggle() {
        let port = RecordingNotificationPort::new();
        let user = UserId::new_v7();

        port.fail_next_dispatches(true);
        let result = port
            .notify(user, "t", "m", NotificationKind::ClaimUpdate, None)
            .await;
        assert!(result.is_err());
        assert!(port.sent().await.is_empty());

        port.fail_next_dispatches(false);
        port.notify(user, "t", "m", NotificationKind::ClaimUpdate, None)
            .await
            .unwrap();
        assert_eq!(port.sent_to(user).await.len(), 1);
    }
}
