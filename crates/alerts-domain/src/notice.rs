use serde::{Deserialize, Serialize};

/// Severity of a transient on-screen notice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// Ephemeral toast shown to the user. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: NoticeSeverity,
    pub duration_ms: u64,
}
