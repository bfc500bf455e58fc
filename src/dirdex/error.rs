use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirdexError {
    /// Single-record lookup found nothing. Always surfaced, never retried.
    #[error("Directory not found: {0}")]
    NotFound(String),

    /// Cache artifacts are missing, unopenable or fail to parse. Recovered
    /// internally by treating the cache as absent; only surfaced when no
    /// other data source exists.
    #[error("Cache unreadable: {0}")]
    CacheUnreadable(String),

    /// Network failure, timeout or non-2xx from the remote catalog.
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// Disk write failed while persisting the cache.
    #[error("Failed to persist cache: {0}")]
    Persist(String),

    /// The in-flight operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, DirdexError>;
