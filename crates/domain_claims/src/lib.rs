//! Expense Claims Lifecycle Domain
//!
//! This crate implements the claim lifecycle from submission through review,
//! approval, and payment, together with SLA deadline tracking and escalation.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Under Review -> Approved -> Paid
//!                 |    ^
//!                 v    |
//!           More Info Required
//! ```
//!
//! Rejection is possible from any pre-approval stage; cancellation only
//! before review starts. Every transition goes through the
//! [`transition`] engine, which appends status history and plans the
//! notification/audit side effects dispatched by the
//! [`lifecycle::ClaimLifecycleService`].

pub mod approval;
pub mod category;
pub mod claim;
pub mod claim_number;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod monitor;
pub mod notification;
pub mod ports;
pub mod sla;
pub mod transition;

pub use approval::{approval_level, requires_approval, ApprovalDecision, ClaimApproval};
pub use category::ExpenseCategory;
pub use claim::{Claim, ClaimStatus, ClaimType, CreateClaimRequest, Priority};
pub use claim_number::format_claim_number;
pub use error::ClaimError;
pub use history::ClaimStatusHistory;
pub use lifecycle::ClaimLifecycleService;
pub use monitor::{CycleOutcome, EscalationMonitor, MonitorConfig};
pub use notification::{NotificationKind, NotificationRequest, UserNotification};
