//! Collaborator seams consumed by the alert engine.

use std::sync::Arc;

use alerts_domain::{Budget, EvaluationWindow, NewNotification, Notice, Notification, Transaction};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{time::Clock, CoreError};

/// Returns the configured budgets of one user.
#[async_trait]
pub trait BudgetSource: Send + Sync {
    async fn budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, CoreError>;
}

/// Returns the transactions of one user created inside `window`.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transactions(
        &self,
        user_id: Uuid,
        window: EvaluationWindow,
    ) -> Result<Vec<Transaction>, CoreError>;
}

/// Durable notification store.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, CoreError>;
}

/// Fire-and-forget transient notice display. Must not block.
pub trait NoticeSink: Send + Sync {
    fn show(&self, notice: Notice);
}

/// Everything one session needs from the host application.
#[derive(Clone)]
pub struct Collaborators {
    pub budgets: Arc<dyn BudgetSource>,
    pub transactions: Arc<dyn TransactionSource>,
    pub notifications: Arc<dyn NotificationSink>,
    pub notices: Arc<dyn NoticeSink>,
    pub clock: Arc<dyn Clock>,
}
