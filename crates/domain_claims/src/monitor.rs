//! SLA escalation monitor
//!
//! A single long-running background sweep over claims approaching or past
//! their SLA due date. The monitor is owned by the process supervisor and
//! receives the same port/clock injections as the request-path services, so
//! a test can run one cycle synchronously against a fixed clock.

use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use core_kernel::{Clock, PortError};

use crate::claim::Claim;
use crate::notification::{breach_notification, warning_notification, NotificationRequest};
use crate::ports::{ClaimsPort, NotificationPort};

/// Tuning for the escalation loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Pause between successful sweeps
    pub check_interval: Duration,
    /// Pause before retrying after a failed sweep
    pub retry_backoff: Duration,
    /// How far ahead of the due date the warning fires
    pub warning_window: ChronoDuration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(60 * 60),
            retry_backoff: Duration::from_secs(5 * 60),
            warning_window: ChronoDuration::hours(24),
        }
    }
}

/// What one sweep did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Claims newly marked escalated this sweep
    pub escalated: usize,
    /// Warning notifications sent this sweep
    pub warned: usize,
}

/// Periodic sweep that escalates overdue claims and warns on near-due ones
pub struct EscalationMonitor {
    claims: Arc<dyn ClaimsPort>,
    notifications: Arc<dyn NotificationPort>,
    clock: Arc<dyn Clock>,
    config: MonitorConfig,
}

impl EscalationMonitor {
    pub fn new(
        claims: Arc<dyn ClaimsPort>,
        notifications: Arc<dyn NotificationPort>,
        clock: Arc<dyn Clock>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            claims,
            notifications,
            clock,
            config,
        }
    }

    /// Runs sweeps until the shutdown signal fires
    ///
    /// A failed sweep is logged and retried after the backoff; the loop
    /// never exits on error. An in-flight sweep finishes before shutdown
    /// takes effect.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("claim escalation monitor started");

        loop {
            let wait = match self.run_cycle().await {
                Ok(outcome) => {
                    if outcome.escalated > 0 || outcome.warned > 0 {
                        tracing::info!(
                            escalated = outcome.escalated,
                            warned = outcome.warned,
                            "escalation sweep complete"
                        );
                    }
                    self.config.check_interval
                }
                Err(err) => {
                    tracing::error!(error = %err, "escalation sweep failed, backing off");
                    self.config.retry_backoff
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("claim escalation monitor stopped");
    }

    /// One sweep: escalate breached claims, warn on claims within the
    /// warning window
    ///
    /// The escalated flag keeps a breach notification from repeating on
    /// later sweeps; warnings deliberately repeat each sweep until the
    /// claim transitions or breaches.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, PortError> {
        let now = self.clock.now();
        let horizon = now + self.config.warning_window;

        let mut outcome = CycleOutcome::default();
        for claim in self.claims.claims_due_by(horizon).await? {
            if claim.escalated || !claim.is_active() {
                continue;
            }

            if claim.sla_due_date <= now {
                self.escalate(claim, now).await?;
                outcome.escalated += 1;
            } else {
                self.dispatch(&warning_notification(&claim)).await;
                tracing::info!(
                    claim_number = %claim.claim_number,
                    due = %claim.sla_due_date,
                    "sent SLA warning"
                );
                outcome.warned += 1;
            }
        }

        Ok(outcome)
    }

    async fn escalate(
        &self,
        mut claim: Claim,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), PortError> {
        // Flag first so a later sweep cannot resend even if the
        // notification below is lost.
        claim.escalate(now);
        self.claims.update_claim(&claim).await?;

        self.dispatch(&breach_notification(&claim)).await;

        tracing::warn!(
            claim_number = %claim.claim_number,
            due = %claim.sla_due_date,
            "SLA breach detected, claim escalated"
        );
        Ok(())
    }

    async fn dispatch(&self, request: &NotificationRequest) {
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
                "failed to dispatch escalation notification"
            );
        }
    }
}
