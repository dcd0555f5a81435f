//! alerts-domain
//!
//! Pure domain models (Budget, Transaction, Notification, Band, etc.).
//! No I/O, no scheduling, no storage. Only data types and core enums.

pub mod band;
pub mod budget;
pub mod common;
pub mod notice;
pub mod notification;
pub mod transaction;
pub mod window;

pub use band::*;
pub use budget::*;
pub use common::*;
pub use notice::*;
pub use notification::*;
pub use transaction::*;
pub use window::*;
