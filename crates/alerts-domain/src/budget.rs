//! Domain types representing category budgets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::lenient_amount;

/// A user-defined monthly spending limit for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    #[serde(
        default,
        rename = "budget_limit",
        alias = "limit",
        deserialize_with = "lenient_amount"
    )]
    pub limit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Budget {
    pub fn new(user_id: Uuid, category: impl Into<String>, limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category: category.into(),
            limit,
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Returns `true` when the limit can be evaluated at all.
    ///
    /// Zero, negative and non-finite limits never produce an alert.
    pub fn is_monitored(&self) -> bool {
        self.limit.is_finite() && self.limit > 0.0
    }
}
