//! Domain model for payment transactions as seen by the alert engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::lenient_amount;

/// An append-only payment record. Negative amounts are debits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        category: impl Into<String>,
        amount: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category: category.into(),
            amount,
            created_at,
        }
    }

    /// Spend contributed by this transaction regardless of sign.
    pub fn spend(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount.abs()
        } else {
            0.0
        }
    }
}
