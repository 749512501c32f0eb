//! Constants for the fixed on-disk project layout.

use std::path::Path;

/// Names that make up a project's directory tree.
///
/// ```text
/// {repo_dir}/repos/{owner}/{name}/
/// ├── repo.git/        # Bare store
/// └── satellite/
///     └── .git/        # Satellite working clone
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgePath {
    /// The `repos` directory under the configured base directory
    ReposDir,
    /// The `repo.git` bare store
    BareRepo,
    /// The `satellite` working directory
    SatelliteDir,
    /// The `.git` directory inside the satellite
    GitDir,
    /// The `.locks` directory holding advisory project lock files
    LocksDir,
}

impl ForgePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReposDir => "repos",
            Self::BareRepo => "repo.git",
            Self::SatelliteDir => "satellite",
            Self::GitDir => ".git",
            Self::LocksDir => ".locks",
        }
    }
}

impl AsRef<Path> for ForgePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ForgePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ForgePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
