//! Claims Escalation Worker Binary
//!
//! Hosts the SLA escalation monitor as a standalone background process.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-monitor
//!
//! # Run with environment variables
//! MONITOR_CHECK_INTERVAL_SECS=900 MONITOR_LOG_LEVEL=debug cargo run --bin claims-monitor
//! ```
//!
//! # Environment Variables
//!
//! * `MONITOR_CHECK_INTERVAL_SECS` - Seconds between sweeps (default: 3600)
//! * `MONITOR_RETRY_BACKOFF_SECS` - Backoff after a failed sweep (default: 300)
//! * `MONITOR_WARNING_WINDOW_HOURS` - Warning lead time before the due date (default: 24)
//! * `MONITOR_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//!
//! The binary currently wires the in-memory adapters so the loop can be
//! exercised end to end; a deployment swaps in the database-backed
//! `ClaimsPort`/`NotificationPort` adapters at the marked constructor.

mod config;

use std::sync::Arc;

use rust_decimal_macros::dec;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Currency, Money, SystemClock};
use domain_claims::category::ExpenseCategory;
use domain_claims::monitor::EscalationMonitor;
use domain_claims::ports::mock::{MemoryClaimsPort, RecordingNotificationPort};

use config::WorkerConfig;

/// Main entry point for the escalation worker.
///
/// Initializes logging, loads configuration, wires the monitor's ports,
/// and runs the sweep loop until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        check_interval_secs = config.check_interval_secs,
        warning_window_hours = config.warning_window_hours,
        "Starting claims escalation worker"
    );

    // Adapter wiring point: replace the in-memory adapters with the
    // database-backed implementations for a real deployment.
    let claims = Arc::new(MemoryClaimsPort::new());
    seed_reference_data(&claims).await;
    let notifications = Arc::new(RecordingNotificationPort::new());
    let clock = Arc::new(SystemClock);

    let monitor = EscalationMonitor::new(claims, notifications, clock, config.monitor_config());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(async move { monitor.run(shutdown_rx).await });

    shutdown_signal().await;
    shutdown_tx.send(true).ok();
    worker.await?;

    tracing::info!("Worker shutdown complete");
    Ok(())
}

/// Loads worker configuration from environment variables.
///
/// Falls back to defaults if environment variables are not set.
fn load_config() -> WorkerConfig {
    WorkerConfig::from_env().unwrap_or_else(|_| WorkerConfig {
        check_interval_secs: std::env::var("MONITOR_CHECK_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600),
        retry_backoff_secs: std::env::var("MONITOR_RETRY_BACKOFF_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(300),
        warning_window_hours: std::env::var("MONITOR_WARNING_WINDOW_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24),
        log_level: std::env::var("MONITOR_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Seeds the demo store with a couple of expense categories.
async fn seed_reference_data(claims: &MemoryClaimsPort) {
    let now = chrono::Utc::now();
    claims
        .seed_category(ExpenseCategory::new(
            "Travel",
            Some(Money::new(dec!(500), Currency::USD)),
            now,
        ))
        .await;
    claims
        .seed_category(ExpenseCategory::new("Equipment", None, now))
        .await;
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown: the in-flight sweep completes before
/// the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
