use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for narrate operations.
#[derive(Error, Debug)]
pub enum NarrateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} files need conversion")]
    CheckFailed(usize),
}

pub type Result<T> = std::result::Result<T, NarrateError>;
