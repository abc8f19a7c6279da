//! Injectable time source
//!
//! Every component that needs "now" receives a `Clock` rather than calling
//! `Utc::now()` directly, so SLA and escalation logic can be driven by a
//! fixed clock in tests.

use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// A source of the current instant
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock that returns a configurable instant
///
/// The instant can be advanced mid-test to simulate the passage of time,
/// e.g. to push a claim past its SLA due date between monitor cycles.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to a new instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock poisoned") = now;
    }

    /// Advances the clock by the given duration
    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now += duration;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}
