use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TyperError {
    #[error("there is no text to type")]
    EmptyText,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, TyperError>;
