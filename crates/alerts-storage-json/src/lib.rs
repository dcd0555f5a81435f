//! File-backed JSON collaborators for the alert engine.
//!
//! Layout under the data root:
//! `budgets.json`, `transactions.json` (read-only here) and
//! `notifications.json` (appended by the engine).

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use alerts_core::{BudgetSource, CoreError, NotificationSink, TransactionSource};
use alerts_domain::{Budget, EvaluationWindow, NewNotification, Notification, Transaction};
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub const BUDGETS_FILE: &str = "budgets.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const NOTIFICATIONS_FILE: &str = "notifications.json";
/// Rows shown by a notification centre.
pub const RECENT_NOTIFICATIONS: usize = 20;
const TMP_SUFFIX: &str = "tmp";

/// Reads budgets and transactions from JSON arrays on disk.
#[derive(Debug, Clone)]
pub struct JsonLedgerSource {
    root: PathBuf,
}

impl JsonLedgerSource {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn budgets_path(&self) -> PathBuf {
        self.root.join(BUDGETS_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.root.join(TRANSACTIONS_FILE)
    }
}

#[async_trait]
impl BudgetSource for JsonLedgerSource {
    async fn budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, CoreError> {
        let rows: Vec<Budget> = load_rows(self.budgets_path()).await?;
        Ok(rows
            .into_iter()
            .filter(|budget| budget.user_id == user_id)
            .collect())
    }
}

#[async_trait]
impl TransactionSource for JsonLedgerSource {
    async fn transactions(
        &self,
        user_id: Uuid,
        window: EvaluationWindow,
    ) -> Result<Vec<Transaction>, CoreError> {
        let rows: Vec<Transaction> = load_rows(self.transactions_path()).await?;
        Ok(rows
            .into_iter()
            .filter(|txn| txn.user_id == user_id && window.contains(txn.created_at))
            .collect())
    }
}

/// Appends notification rows to a JSON array, rewriting the file atomically.
///
/// Inserts run on the blocking pool and never hold up the async caller.
#[derive(Debug, Clone)]
pub struct JsonNotificationStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonNotificationStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            path: root.join(NOTIFICATIONS_FILE),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored rows for `user_id`, newest first, keeping at most `limit`.
    pub fn list(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, CoreError> {
        let mut rows: Vec<Notification> = read_rows::<Notification>(&self.path)?
            .into_iter()
            .filter(|row| row.user_id == user_id)
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    pub fn unread_count(&self, user_id: Uuid) -> Result<usize, CoreError> {
        Ok(self
            .list(user_id, None)?
            .iter()
            .filter(|row| !row.is_read)
            .count())
    }
}

fn append_row(path: &Path, write_lock: &Mutex<()>, row: &Notification) -> Result<(), CoreError> {
    let _guard = write_lock.lock().unwrap_or_else(PoisonError::into_inner);
    let mut rows: Vec<serde_json::Value> = if path.exists() {
        serde_json::from_str(&fs::read_to_string(path)?)?
    } else {
        Vec::new()
    };
    rows.push(serde_json::to_value(row)?);
    let json = serde_json::to_string_pretty(&rows)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[async_trait]
impl NotificationSink for JsonNotificationStore {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, CoreError> {
        let row = Notification::from_new(notification, Utc::now());
        let path = self.path.clone();
        let write_lock = self.write_lock.clone();
        let stored = row.clone();
        tokio::task::spawn_blocking(move || append_row(&path, &write_lock, &stored))
            .await
            .map_err(|err| CoreError::Persist(format!("Notification writer failed: {err}")))?
            .map_err(|err| CoreError::Persist(err.to_string()))?;
        Ok(row)
    }
}

/// Runs [`read_rows`] on the blocking pool.
async fn load_rows<T>(path: PathBuf) -> Result<Vec<T>, CoreError>
where
    T: DeserializeOwned + Send + 'static,
{
    let label = path.display().to_string();
    tokio::task::spawn_blocking(move || read_rows(&path))
        .await
        .map_err(|err| CoreError::Fetch(format!("{label}: reader failed: {err}")))?
}

/// Decodes a JSON array, skipping rows that do not match `T`.
///
/// A missing file reads as empty; a file that is not a JSON array is an error.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)
        .map_err(|err| CoreError::Fetch(format!("{}: {}", path.display(), err)))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&data)
        .map_err(|err| CoreError::Fetch(format!("{}: {}", path.display(), err)))?;

    let mut rows = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(row) => rows.push(row),
            Err(err) => {
                tracing::warn!(path = %path.display(), index, "Skipping malformed row: {}", err);
            }
        }
    }
    Ok(rows)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
