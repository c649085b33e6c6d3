use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Language not supported: {0}")]
    LanguageNotSupported(String),

    #[error("Source text contains syntax errors")]
    SyntaxError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
