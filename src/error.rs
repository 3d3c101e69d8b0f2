use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("schedule store I/O failed: {0}")]
    IoError(#[from] std::io::Error),

    #[error("schedule store serialization failed: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("invalid scenario configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
