//! Worker configuration

use chrono::Duration as ChronoDuration;
use serde::Deserialize;
use std::time::Duration;

use domain_claims::monitor::MonitorConfig;

/// Escalation worker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Seconds between successful sweeps
    pub check_interval_secs: u64,
    /// Seconds to back off after a failed sweep
    pub retry_backoff_secs: u64,
    /// Hours ahead of the due date the warning fires
    pub warning_window_hours: i64,
    /// Log level
    pub log_level: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 3600,
            retry_backoff_secs: 300,
            warning_window_hours: 24,
            log_level: "info".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("MONITOR"))
            .build()?
            .try_deserialize()
    }

    /// Converts to the domain monitor's tuning
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            check_interval: Duration::from_secs(self.check_interval_secs),
            retry_backoff: Duration::from_secs(self.retry_backoff_secs),
            warning_window: ChronoDuration::hours(self.warning_window_hours),
        }
    }
}
