//! alerts-core
//!
//! Budget alert engine and the services around it.
//! Depends on alerts-domain. No terminal I/O, no direct file access.

pub mod alert;
pub mod alert_state;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod format;
pub mod memory;
pub mod motivational;
pub mod session;
pub mod sources;
pub mod spend;
pub mod time;


pub use alert::BudgetAlert;
pub use alert_state::AlertState;
pub use engine::{BudgetAlertEngine, TickOutcome};
pub use error::CoreError;
pub use format::{
    formatter_for_locale, AmountFormatter, IndianAmountFormatter, ThousandsAmountFormatter,
};
pub use session::{AlertSession, SessionOptions, SessionStats, SessionStatsSnapshot};
pub use sources::{BudgetSource, Collaborators, NoticeSink, NotificationSink, TransactionSource};
pub use spend::SpendAggregate;
pub use time::{Clock, FixedClock, SystemClock};
