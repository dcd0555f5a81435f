use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use alerts_core::{
    memory::{MemoryLedger, MemoryNotifications, RecordingNotices},
    AlertSession, BudgetSource, Collaborators, CoreError, FixedClock, SessionOptions,
};
use alerts_domain::{Budget, NotificationKind, Transaction};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Budget source that answers slowly and records how many calls overlap.
struct SlowBudgets {
    inner: Arc<MemoryLedger>,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowBudgets {
    fn new(inner: Arc<MemoryLedger>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BudgetSource for SlowBudgets {
    async fn budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let result = self.inner.budgets(user_id).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

struct Env {
    user: Uuid,
    now: DateTime<Utc>,
    ledger: Arc<MemoryLedger>,
    notifications: Arc<MemoryNotifications>,
    notices: Arc<RecordingNotices>,
    collab: Collaborators,
}

fn env() -> Env {
    let user = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap();
    let ledger = Arc::new(MemoryLedger::new());
    let notifications = Arc::new(MemoryNotifications::new());
    let notices = Arc::new(RecordingNotices::new());
    let collab = Collaborators {
        budgets: ledger.clone(),
        transactions: ledger.clone(),
        notifications: notifications.clone(),
        notices: notices.clone(),
        clock: Arc::new(FixedClock::new(now)),
    };
    ledger.add_budget(Budget::new(user, "Food", 8000.0));
    ledger.add_transaction(Transaction::new(user, "Food", -6800.0, now));
    Env {
        user,
        now,
        ledger,
        notifications,
        notices,
        collab,
    }
}

fn options(user: Uuid) -> SessionOptions {
    let mut options = SessionOptions::new(user);
    options.poll_interval = Duration::from_secs(15);
    options.motivational_delay = Duration::from_secs(8);
    options.rng_seed = Some(42);
    options
}

fn motivational_count(env: &Env) -> usize {
    env.notifications
        .list(env.user)
        .iter()
        .filter(|row| row.kind == NotificationKind::Motivational)
        .count()
}

#[tokio::test(start_paused = true)]
async fn first_tick_runs_immediately_and_repeats_without_duplicates() {
    let env = env();
    let mut opts = options(env.user);
    opts.motivational = false;
    let session = AlertSession::start(opts, env.collab.clone());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(env.notices.len(), 1);
    assert_eq!(session.stats().ticks_run, 1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(session.stats().ticks_run >= 4);
    assert_eq!(env.notices.len(), 1);
    assert_eq!(env.notifications.len(), 1);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn motivational_fires_once_after_delay() {
    let env = env();
    let session = AlertSession::start(options(env.user), env.collab.clone());

    tokio::time::sleep(Duration::from_millis(7_900)).await;
    assert_eq!(motivational_count(&env), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(motivational_count(&env), 1);

    assert!(!session.schedule_motivational());
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(motivational_count(&env), 1);
    assert_eq!(session.stats().motivational_sent, 1);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_before_delay_cancels_motivational_and_ticks() {
    let env = env();
    let session = AlertSession::start(options(env.user), env.collab.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(env.notices.len(), 1);

    session.shutdown().await;
    // Would push Food over its limit if any tick still ran.
    env.ledger
        .add_transaction(Transaction::new(env.user, "Food", -5000.0, env.now));
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(motivational_count(&env), 0);
    assert_eq!(env.notices.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_stops_timers() {
    let env = env();
    {
        let mut opts = options(env.user);
        opts.budget_alerts = false;
        let _session = AlertSession::start(opts, env.collab.clone());
    }
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(env.notices.is_empty());
}

#[tokio::test(start_paused = true)]
async fn preferences_disable_each_family() {
    let env = env();
    let mut opts = options(env.user);
    opts.budget_alerts = false;
    opts.motivational = false;
    let session = AlertSession::start(opts, env.collab.clone());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(env.notices.is_empty());
    assert_eq!(session.stats().ticks_run, 0);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn new_session_starts_with_fresh_alert_state() {
    let env = env();
    let mut opts = options(env.user);
    opts.motivational = false;

    let first = AlertSession::start(opts.clone(), env.collab.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;
    first.shutdown().await;

    let second = AlertSession::start(opts, env.collab.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;
    second.shutdown().await;

    assert_eq!(env.notices.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn unavailable_backend_skips_ticks_until_it_recovers() {
    let env = env();
    env.ledger.set_unavailable(true);
    let mut opts = options(env.user);
    opts.motivational = false;
    let session = AlertSession::start(opts, env.collab.clone());

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(env.notices.is_empty());
    assert!(session.stats().ticks_aborted >= 2);

    env.ledger.set_unavailable(false);
    tokio::time::sleep(Duration::from_secs(15)).await;
    assert_eq!(env.notices.len(), 1);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn slow_tick_is_never_overlapped_by_the_next_one() {
    let mut env = env();
    let slow = Arc::new(SlowBudgets::new(env.ledger.clone(), Duration::from_secs(40)));
    env.collab.budgets = slow.clone();
    let mut opts = options(env.user);
    opts.motivational = false;
    let session = AlertSession::start(opts, env.collab.clone());

    tokio::time::sleep(Duration::from_secs(100)).await;

    assert_eq!(slow.max_in_flight.load(Ordering::SeqCst), 1);
    // Three ticks have started and the third is still in flight.
    assert_eq!(slow.calls.load(Ordering::SeqCst), 3);
    assert_eq!(session.stats().ticks_run, 2);
    assert_eq!(env.notices.len(), 1);
    assert_eq!(env.notifications.len(), 1);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn locale_selects_digit_grouping() {
    let env = env();
    env.ledger.add_budget(Budget::new(env.user, "Rent", 800_000.0));
    env.ledger
        .add_transaction(Transaction::new(env.user, "Rent", -680_000.0, env.now));
    let mut opts = options(env.user);
    opts.motivational = false;
    opts.locale = "en-US".into();
    let session = AlertSession::start(opts, env.collab.clone());

    tokio::time::sleep(Duration::from_secs(1)).await;
    session.shutdown().await;

    let rent = env
        .notices
        .shown()
        .into_iter()
        .find(|notice| notice.title.contains("Rent"))
        .expect("rent notice");
    assert_eq!(rent.description, "85% of ₹800,000 Rent budget used.");
}
