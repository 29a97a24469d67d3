//! Batch errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Path not found or not a directory: {0}")]
    PathNotFound(PathBuf),

    #[error("Path not found or not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid pack prefix '{0}': expected 3-8 letters")]
    InvalidPackPrefix(String),

    #[error("Invalid output prefix '{0}': the destination must be a sibling of the source")]
    InvalidOutputPrefix(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl RenameError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenameError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the source-path errors raised before anything is written.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            RenameError::PathNotFound(_) | RenameError::NotADirectory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
