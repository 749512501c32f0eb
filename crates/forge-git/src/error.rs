//! Error types for forge-git

use std::path::PathBuf;

/// Result type for forge-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in forge-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] forge_fs::Error),

    /// Creating the bare store or cloning the satellite failed
    #[error("Failed to create repository at {path}: {message}")]
    RepositoryCreation { path: PathBuf, message: String },

    /// A fork's parent has no satellite to clone from
    #[error("Parent satellite at {path} is not initialized")]
    ParentUninitialized { path: PathBuf },

    /// The bare store refused the satellite's primary branch
    #[error("Push of {refname} to bare store rejected: {message}")]
    PushRejected { refname: String, message: String },

    /// The repository is missing or has no resolvable head
    #[error("Repository at {path} unavailable: {message}")]
    RepositoryUnavailable { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn creation(path: impl Into<PathBuf>, err: &git2::Error) -> Self {
        Self::RepositoryCreation {
            path: path.into(),
            message: err.message().to_string(),
        }
    }

    pub(crate) fn unavailable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::RepositoryUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }
}
