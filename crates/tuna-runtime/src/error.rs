use thiserror::Error;
use tuna_detect::SnapshotError;

#[derive(Debug, Error)]
pub enum TunaError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listener rejected the report (status {0})")]
    Rejected(u16),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}
