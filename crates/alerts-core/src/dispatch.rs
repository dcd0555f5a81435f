//! Best-effort delivery of one alert to the notice and notification sinks.

use std::{
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

use alerts_domain::{NewNotification, Notice};

use crate::{session::SessionStats, sources::Collaborators, CoreError};

/// Shows `notice` and persists `notification`.
///
/// The notice is handed off without waiting. Persistence is bounded by
/// `persist_timeout`; failures are logged and counted, never returned, and
/// never retried.
pub async fn deliver(
    collab: &Collaborators,
    stats: &Arc<SessionStats>,
    persist_timeout: Duration,
    notice: Notice,
    notification: NewNotification,
) {
    collab.notices.show(notice);

    let kind = notification.kind;
    let category = notification.category.clone().unwrap_or_default();
    let result = match tokio::time::timeout(
        persist_timeout,
        collab.notifications.insert(notification),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(CoreError::Timeout(format!(
            "notification insert exceeded {}ms",
            persist_timeout.as_millis()
        ))),
    };

    match result {
        Ok(record) => {
            tracing::debug!(notification_id = %record.id, %kind, "Notification stored");
        }
        Err(err) => {
            stats.persist_failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!(%kind, category = %category, "Failed to store notification: {}", err);
        }
    }
}
