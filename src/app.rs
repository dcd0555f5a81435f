//! Wires configuration, JSON storage and the console into alert sessions.

use std::{future::Future, path::PathBuf, sync::Arc};

use alerts_config::{AlertConfig, ConfigManager};
use alerts_core::{
    formatter_for_locale, AlertSession, BudgetAlertEngine, Collaborators, NoticeSink,
    SessionOptions, SessionStats, SessionStatsSnapshot, SystemClock, TickOutcome,
};
use alerts_storage_json::{JsonLedgerSource, JsonNotificationStore};
use uuid::Uuid;

use crate::errors::Result;

/// Maps persisted configuration onto the options of one session.
pub fn session_options(config: &AlertConfig, user_id: Uuid) -> SessionOptions {
    SessionOptions {
        user_id,
        poll_interval: config.poll_interval(),
        motivational_delay: config.motivational_delay(),
        persist_timeout: config.persist_timeout(),
        currency_symbol: config.currency_symbol.clone(),
        locale: config.locale.clone(),
        budget_alerts: config.preferences.budget_alerts,
        motivational: config.preferences.motivational,
        rng_seed: None,
    }
}

/// A configured data directory ready to host alert sessions.
pub struct App {
    config: AlertConfig,
    ledger: Arc<JsonLedgerSource>,
    notifications: Arc<JsonNotificationStore>,
}

impl App {
    /// Loads `<base>/config/config.json` and opens the JSON stores.
    ///
    /// `base` defaults to the platform data directory. A `data_root` set in
    /// the config overrides where ledger and notification files live.
    pub fn open(base: Option<PathBuf>) -> Result<Self> {
        let base = base.unwrap_or_else(|| AlertConfig::default().resolve_data_root());
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let data_root = config.data_root.clone().unwrap_or(base);
        let ledger = Arc::new(JsonLedgerSource::new(data_root.clone())?);
        let notifications = Arc::new(JsonNotificationStore::new(data_root.clone())?);
        tracing::debug!(data_root = %data_root.display(), "Opened alert data directory");
        Ok(Self {
            config,
            ledger,
            notifications,
        })
    }

    pub fn notifications(&self) -> &JsonNotificationStore {
        &self.notifications
    }

    pub fn collaborators(&self, notices: Arc<dyn NoticeSink>) -> Collaborators {
        Collaborators {
            budgets: self.ledger.clone(),
            transactions: self.ledger.clone(),
            notifications: self.notifications.clone(),
            notices,
            clock: Arc::new(SystemClock),
        }
    }

    /// Runs a single evaluation tick in a throwaway session.
    pub async fn run_once(
        &self,
        user_id: Uuid,
        notices: Arc<dyn NoticeSink>,
    ) -> (TickOutcome, SessionStatsSnapshot) {
        let stats = Arc::new(SessionStats::default());
        if !self.config.preferences.budget_alerts {
            tracing::info!("Budget alerts disabled by preference");
            return (TickOutcome::Evaluated { alerts: 0 }, stats.snapshot());
        }
        let options = session_options(&self.config, user_id);
        let mut engine = BudgetAlertEngine::new(
            user_id,
            self.collaborators(notices),
            formatter_for_locale(&options.locale, options.currency_symbol),
            options.persist_timeout,
            stats.clone(),
        );
        let outcome = engine.tick().await;
        (outcome, stats.snapshot())
    }

    /// Runs a full session until `shutdown` resolves.
    pub async fn run_session<F>(
        &self,
        user_id: Uuid,
        notices: Arc<dyn NoticeSink>,
        shutdown: F,
    ) -> SessionStatsSnapshot
    where
        F: Future<Output = ()>,
    {
        let session = AlertSession::start(
            session_options(&self.config, user_id),
            self.collaborators(notices),
        );
        shutdown.await;
        let stats = session.stats();
        session.shutdown().await;
        stats
    }
}
