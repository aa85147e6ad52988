use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MirageResult<T> = Result<T, MirageError>;
