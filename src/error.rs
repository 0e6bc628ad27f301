use thiserror::Error;

/// Store invariant violations. These indicate a bug in the caller, not a runtime condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("window id already present: {0}")]
    DuplicateId(String),
}

/// Failures reading or writing the durable storage slot
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode window state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
