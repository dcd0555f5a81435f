//! In-process collaborators for embedding the engine without a backend.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use alerts_domain::{Budget, EvaluationWindow, NewNotification, Notice, Notification, Transaction};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    sources::{BudgetSource, NoticeSink, NotificationSink, TransactionSource},
    CoreError,
};

/// Budgets and transactions held in memory.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    budgets: Mutex<Vec<Budget>>,
    transactions: Mutex<Vec<Transaction>>,
    fail_fetches: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_budget(&self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(budget);
        id
    }

    pub fn add_transaction(&self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(transaction);
        id
    }

    pub fn clear_transactions(&self) {
        self.transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Makes every subsequent fetch fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail_fetches.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            Err(CoreError::Fetch("ledger unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BudgetSource for MemoryLedger {
    async fn budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, CoreError> {
        self.check_available()?;
        let budgets = self.budgets.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(budgets
            .iter()
            .filter(|budget| budget.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionSource for MemoryLedger {
    async fn transactions(
        &self,
        user_id: Uuid,
        window: EvaluationWindow,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.check_available()?;
        let transactions = self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(transactions
            .iter()
            .filter(|txn| txn.user_id == user_id && window.contains(txn.created_at))
            .cloned()
            .collect())
    }
}

/// Notification rows held in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifications {
    rows: Mutex<Vec<Notification>>,
    fail_inserts: AtomicBool,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent insert fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.fail_inserts.store(failing, Ordering::SeqCst);
    }

    /// Stored rows for `user_id`, newest first.
    pub fn list(&self, user_id: Uuid) -> Vec<Notification> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<Notification> = rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        out.reverse();
        out
    }

    pub fn len(&self) -> usize {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NotificationSink for MemoryNotifications {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, CoreError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(CoreError::Persist("notification store unavailable".into()));
        }
        let row = Notification::from_new(notification, Utc::now());
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(row.clone());
        Ok(row)
    }
}

/// Keeps every notice it is shown, in order.
#[derive(Debug, Default)]
pub struct RecordingNotices {
    shown: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notice> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoticeSink for RecordingNotices {
    fn show(&self, notice: Notice) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
