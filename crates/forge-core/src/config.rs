//! Forge configuration
//!
//! Loaded from a `.toml` or `.json` file; every field has a default, so a
//! missing file or a partial file is fine.
//!
//! ```toml
//! repo_dir = "/srv/forge"
//! provision_roots = true
//! primary_branch = "master"
//! rollback_on_failure = true
//! ```

use forge_fs::{ForgePath, NormalizedPath, load_config};
use forge_git::{DEFAULT_PRIMARY_BRANCH, InitOptions};
use serde::{Deserialize, Serialize};

use crate::{ProjectId, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Base directory; project roots live at `{repo_dir}/repos/{owner}/{name}`
    pub repo_dir: NormalizedPath,

    /// Create a project's root directory before initializing it.
    /// When false, a missing root makes initialization a logged no-op.
    pub provision_roots: bool,

    /// Branch pushed from satellite to bare store
    pub primary_branch: String,

    /// Remove the project tree (and record) when creation fails
    pub rollback_on_failure: bool,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        let repo_dir = dirs::data_local_dir()
            .map(|dir| NormalizedPath::new(dir.join("forge")))
            .unwrap_or_else(|| NormalizedPath::new("forge-data"));

        Self {
            repo_dir,
            provision_roots: true,
            primary_branch: DEFAULT_PRIMARY_BRANCH.to_string(),
            rollback_on_failure: true,
        }
    }
}

impl ForgeConfig {
    /// Defaults with the given base directory.
    pub fn with_repo_dir(repo_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            ..Self::default()
        }
    }

    /// Load from `path`, using defaults if the file does not exist.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(load_config(path)?)
    }

    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            primary_branch: self.primary_branch.clone(),
        }
    }

    /// Advisory lock file serializing cross-process work on one project.
    pub fn lock_path(&self, id: ProjectId) -> NormalizedPath {
        self.repo_dir
            .join(ForgePath::LocksDir.as_str())
            .join(&format!("{id}.lock"))
    }
}
