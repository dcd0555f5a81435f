use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Persistence failed: {0}")]
    Persist(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
