//! Per-login scheduling of the alert engine and the motivational notice.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use rand::{rngs::StdRng, SeedableRng};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    dispatch::deliver,
    engine::BudgetAlertEngine,
    format::formatter_for_locale,
    motivational,
    sources::Collaborators,
};

/// Settings a session is started with. Read once; never reloaded mid-session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub user_id: Uuid,
    pub poll_interval: Duration,
    pub motivational_delay: Duration,
    pub persist_timeout: Duration,
    pub currency_symbol: String,
    /// Locale tag selecting digit grouping for amounts.
    pub locale: String,
    pub budget_alerts: bool,
    pub motivational: bool,
    /// Seeds motivational selection; entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl SessionOptions {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            poll_interval: Duration::from_secs(15),
            motivational_delay: Duration::from_secs(8),
            persist_timeout: Duration::from_secs(5),
            currency_symbol: "₹".into(),
            locale: "en-IN".into(),
            budget_alerts: true,
            motivational: true,
            rng_seed: None,
        }
    }
}

/// Counters shared by the session tasks.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub ticks_run: AtomicU64,
    pub ticks_aborted: AtomicU64,
    pub alerts_emitted: AtomicU64,
    pub motivational_sent: AtomicU64,
    pub persist_failures: AtomicU64,
}

impl SessionStats {
    pub fn snapshot(&self) -> SessionStatsSnapshot {
        SessionStatsSnapshot {
            ticks_run: self.ticks_run.load(Ordering::Relaxed),
            ticks_aborted: self.ticks_aborted.load(Ordering::Relaxed),
            alerts_emitted: self.alerts_emitted.load(Ordering::Relaxed),
            motivational_sent: self.motivational_sent.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStatsSnapshot {
    pub ticks_run: u64,
    pub ticks_aborted: u64,
    pub alerts_emitted: u64,
    pub motivational_sent: u64,
    pub persist_failures: u64,
}

/// One signed-in user's alerting lifetime.
///
/// Owns a fresh engine (and therefore a fresh alert state), the evaluation
/// loop and the one-shot motivational task. Shutting down or dropping the
/// session cancels every pending timer.
pub struct AlertSession {
    options: SessionOptions,
    collab: Collaborators,
    cancel: CancellationToken,
    motivational_latch: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    stats: Arc<SessionStats>,
}

impl AlertSession {
    /// Starts the session tasks on the current tokio runtime.
    pub fn start(options: SessionOptions, collab: Collaborators) -> Self {
        let session = Self {
            options,
            collab,
            cancel: CancellationToken::new(),
            motivational_latch: AtomicBool::new(false),
            tasks: Mutex::new(Vec::new()),
            stats: Arc::new(SessionStats::default()),
        };

        tracing::info!(
            user_id = %session.options.user_id,
            poll_secs = session.options.poll_interval.as_secs(),
            "Alert session starting"
        );

        if session.options.budget_alerts {
            session.spawn_evaluation_loop();
        } else {
            tracing::info!("Budget alerts disabled by preference");
        }
        if session.options.motivational {
            session.schedule_motivational();
        }
        session
    }

    pub fn stats(&self) -> SessionStatsSnapshot {
        self.stats.snapshot()
    }

    /// Arms the motivational notice. Returns `false` when it was already
    /// armed in this session or the session has ended.
    pub fn schedule_motivational(&self) -> bool {
        if self.cancel.is_cancelled() || self.motivational_latch.swap(true, Ordering::SeqCst) {
            return false;
        }

        let collab = self.collab.clone();
        let stats = self.stats.clone();
        let cancel = self.cancel.clone();
        let delay = self.options.motivational_delay;
        let persist_timeout = self.options.persist_timeout;
        let user_id = self.options.user_id;
        let mut rng = match self.options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            let message = motivational::pick(&mut rng);
            tracing::info!(%user_id, title = message.title, "Sending motivational notice");
            deliver(
                &collab,
                &stats,
                persist_timeout,
                message.notice(),
                message.notification(user_id),
            )
            .await;
            stats.motivational_sent.fetch_add(1, Ordering::Relaxed);
        });
        self.track(handle);
        true
    }

    /// Cancels all timers and waits for in-flight work to unwind.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let handles: Vec<JoinHandle<()>> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for handle in handles {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    tracing::error!("Alert session task failed: {}", err);
                }
            }
        }
        tracing::info!(user_id = %self.options.user_id, "Alert session ended");
    }

    fn spawn_evaluation_loop(&self) {
        let formatter = formatter_for_locale(
            &self.options.locale,
            self.options.currency_symbol.clone(),
        );
        let mut engine = BudgetAlertEngine::new(
            self.options.user_id,
            self.collab.clone(),
            formatter,
            self.options.persist_timeout,
            self.stats.clone(),
        );
        let cancel = self.cancel.clone();
        let mut interval = tokio::time::interval(self.options.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }
                // The next tick cannot start until this one finishes.
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = engine.tick() => {}
                }
            }
            tracing::debug!("Alert evaluation loop stopped");
        });
        self.track(handle);
    }

    fn track(&self, handle: JoinHandle<()>) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}

impl Drop for AlertSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
