//! alerts-config
//!
//! Persistent alert preferences and scheduling configuration.
//! Owns the AlertConfig data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AlertConfig, NotificationPreferences};
