//! The "dataset unavailable" condition raised while loading reference data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The dataset file could not be read.
    #[error("dataset unavailable: cannot read {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    /// The dataset file is not valid JSON.
    #[error("dataset unavailable: cannot parse {path}: {error}")]
    Parse {
        path: PathBuf,
        error: serde_json::Error,
    },

    /// The JSON parsed but does not have the expected shape.
    #[error("dataset unavailable: malformed {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl ReferenceError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ReferenceError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
