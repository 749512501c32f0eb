//! [`ForgeSandbox`] temporary base directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary forge base directory (`repo_dir`) that is removed on drop.
pub struct ForgeSandbox {
    temp_dir: TempDir,
}

impl Default for ForgeSandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ForgeSandbox {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The base directory.
    pub fn repo_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// `{repo_dir}/repos/{owner}/{name}`, created on disk.
    pub fn provision(&self, owner: &str, name: &str) -> PathBuf {
        let root = self.repo_dir().join("repos").join(owner).join(name);
        fs::create_dir_all(&root).unwrap();
        root
    }

    /// Assert that `path` does not exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_absent(&self, path: &Path) {
        assert!(!path.exists(), "Expected path NOT to exist: {}", path.display());
    }
}
