//! Core Kernel - Foundational types and utilities for the claims system
//!
//! This crate provides the fundamental building blocks used across the
//! lifecycle core:
//! - Money types with precise decimal arithmetic
//! - Business-day calendar arithmetic for SLA deadlines
//! - An injectable clock so time-dependent logic stays testable
//! - Common identifiers and the port error/marker infrastructure

pub mod calendar;
pub mod clock;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use calendar::{add_business_days, business_days_between, is_business_day, next_business_day};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CoreError;
pub use identifiers::{ApprovalId, CategoryId, ClaimId, NotificationId, UserId};
pub use money::{Currency, Money, MoneyError};
pub use ports::{DomainPort, PortError};
