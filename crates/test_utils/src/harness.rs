//! Fully wired lifecycle service over the in-memory adapters
//!
//! Most integration tests want the whole stack: a seeded claims store,
//! recording sinks, a fixed clock, and the service composed from them.

use std::sync::Arc;

use core_kernel::FixedClock;
use domain_claims::lifecycle::ClaimLifecycleService;
use domain_claims::monitor::{EscalationMonitor, MonitorConfig};
use domain_claims::ports::mock::{
    MemoryClaimsPort, RecordingAuditPort, RecordingEmailPort, RecordingNotificationPort,
    StaticUserDirectory,
};

use crate::fixtures::{CategoryFixtures, IdFixtures, TemporalFixtures};

/// Everything a lifecycle test needs, sharing one set of adapters
pub struct LifecycleHarness {
    pub claims: Arc<MemoryClaimsPort>,
    pub notifications: Arc<RecordingNotificationPort>,
    pub audit: Arc<RecordingAuditPort>,
    pub email: Arc<RecordingEmailPort>,
    pub clock: Arc<FixedClock>,
    pub service: ClaimLifecycleService,
}

impl LifecycleHarness {
    /// Builds a harness seeded with the fixture categories and the owner's
    /// email, with the clock pinned to [`TemporalFixtures::test_now`]
    pub async fn new() -> Self {
        let claims = Arc::new(MemoryClaimsPort::with_categories(CategoryFixtures::all()).await);
        let notifications = Arc::new(RecordingNotificationPort::new());
        let audit = Arc::new(RecordingAuditPort::new());
        let email = Arc::new(RecordingEmailPort::new());
        let directory = Arc::new(
            StaticUserDirectory::new().with_email(IdFixtures::owner(), "owner@example.com"),
        );
        let clock = Arc::new(FixedClock::at(TemporalFixtures::test_now()));

        let service = ClaimLifecycleService::new(
            claims.clone(),
            notifications.clone(),
            audit.clone(),
            email.clone(),
            directory,
            clock.clone(),
        );

        Self {
            claims,
            notifications,
            audit,
            email,
            clock,
            service,
        }
    }

    /// An escalation monitor sharing this harness's adapters and clock
    pub fn monitor(&self, config: MonitorConfig) -> EscalationMonitor {
        EscalationMonitor::new(
            self.claims.clone(),
            self.notifications.clone(),
            self.clock.clone(),
            config,
        )
    }
}
