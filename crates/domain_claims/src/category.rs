//! Expense category reference data
//!
//! Categories are maintained by administrators outside this core; the
//! lifecycle only reads them during creation validation and when deciding
//! whether an amount needs approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, Money};

/// An expense category with an optional per-category amount limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Claims above this amount require approval; None means every claim
    /// in the category does
    pub max_amount: Option<Money>,
    pub requires_approval: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ExpenseCategory {
    pub fn new(name: impl Into<String>, max_amount: Option<Money>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CategoryId::new_v7(),
            name: name.into(),
            description: None,
            max_amount,
            requires_approval: true,
            is_active: true,
            created_at,
        }
    }
}
