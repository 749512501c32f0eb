//! Error types for forge-core

use std::path::PathBuf;

use crate::ProjectId;

/// Result type for forge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in forge-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No record with this id exists in the store
    #[error("Project not found: {id}")]
    ProjectNotFound { id: ProjectId },

    /// A fork's parent is missing or has not been initialized
    #[error("Parent project {parent} cannot be resolved or is not initialized")]
    UnresolvedParent { parent: ProjectId },

    /// The root directory was already recorded for this project
    #[error("Project {id} already has a root directory")]
    PathAlreadyAssigned { id: ProjectId },

    /// The project has no root directory yet
    #[error("Project {id} has no root directory assigned")]
    PathNotAssigned { id: ProjectId },

    /// Another project of the same owner uses this name
    #[error("Project '{name}' already exists for owner '{owner}'")]
    DuplicateName { owner: String, name: String },

    /// Repositories already exist under the project root
    #[error("Project {id} is already initialized at {path}")]
    AlreadyInitialized { id: ProjectId, path: PathBuf },

    /// Filesystem error from forge-fs
    #[error(transparent)]
    Fs(#[from] forge_fs::Error),

    /// Git error from forge-git
    #[error(transparent)]
    Git(#[from] forge_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
