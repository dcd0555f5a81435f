//! Budget threshold evaluation.

use std::{
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

use alerts_domain::{Band, Budget, EvaluationWindow, Transaction};
use uuid::Uuid;

use crate::{
    alert::BudgetAlert, alert_state::AlertState, dispatch::deliver, format::AmountFormatter,
    session::SessionStats, sources::Collaborators, spend::SpendAggregate,
};

/// Result of one scheduled evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Both snapshots were fetched and evaluated; `alerts` were emitted.
    Evaluated { alerts: usize },
    /// A fetch failed and nothing was evaluated.
    Aborted,
}

/// Compares category spend against budget limits and emits each
/// (budget, band) alert at most once per session.
///
/// The engine owns its [`AlertState`]; one instance belongs to exactly one
/// user session and is driven by a single task.
pub struct BudgetAlertEngine {
    user_id: Uuid,
    state: AlertState,
    collab: Collaborators,
    formatter: Arc<dyn AmountFormatter>,
    persist_timeout: Duration,
    stats: Arc<SessionStats>,
}

impl BudgetAlertEngine {
    pub fn new(
        user_id: Uuid,
        collab: Collaborators,
        formatter: Arc<dyn AmountFormatter>,
        persist_timeout: Duration,
        stats: Arc<SessionStats>,
    ) -> Self {
        Self {
            user_id,
            state: AlertState::new(),
            collab,
            formatter,
            persist_timeout,
            stats,
        }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Classifies every monitored budget against spend inside `window` and
    /// marks the alerts that are due. The returned alerts are already recorded
    /// in the session state.
    pub fn evaluate(
        &mut self,
        budgets: &[Budget],
        transactions: &[Transaction],
        window: EvaluationWindow,
    ) -> Vec<BudgetAlert> {
        let spend = SpendAggregate::from_transactions(
            transactions
                .iter()
                .filter(|txn| window.contains(txn.created_at)),
        );

        let mut alerts = Vec::new();
        for budget in budgets {
            if !budget.is_monitored() {
                continue;
            }
            let spent = spend.spent(&budget.category);
            let pct = spent * 100.0 / budget.limit;
            let band = Band::classify(pct);
            if !band.is_alerting() {
                continue;
            }
            if !self.state.try_mark(budget.id, band) {
                tracing::debug!(
                    budget_id = %budget.id,
                    category = %budget.category,
                    %band,
                    "Alert already shown this session"
                );
                continue;
            }
            tracing::info!(
                budget_id = %budget.id,
                category = %budget.category,
                %band,
                pct,
                "Budget alert raised"
            );
            alerts.extend(BudgetAlert::new(budget, band, spent, pct));
        }
        alerts
    }

    /// Fetches both snapshots, evaluates them and delivers the resulting alerts.
    pub async fn tick(&mut self) -> TickOutcome {
        let window = EvaluationWindow::month_to_date(self.collab.clock.now());
        let (budgets, transactions) = tokio::join!(
            self.collab.budgets.budgets(self.user_id),
            self.collab.transactions.transactions(self.user_id, window),
        );

        let (budgets, transactions) = match (budgets, transactions) {
            (Ok(budgets), Ok(transactions)) => (budgets, transactions),
            (Err(err), _) | (_, Err(err)) => {
                self.stats.ticks_aborted.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(user_id = %self.user_id, "Skipping alert tick: {}", err);
                return TickOutcome::Aborted;
            }
        };

        let alerts = self.evaluate(&budgets, &transactions, window);
        for alert in &alerts {
            deliver(
                &self.collab,
                &self.stats,
                self.persist_timeout,
                alert.notice(self.formatter.as_ref()),
                alert.notification(self.user_id, self.formatter.as_ref()),
            )
            .await;
        }

        self.stats.ticks_run.fetch_add(1, Ordering::Relaxed);
        self.stats
            .alerts_emitted
            .fetch_add(alerts.len() as u64, Ordering::Relaxed);
        TickOutcome::Evaluated {
            alerts: alerts.len(),
        }
    }
}
