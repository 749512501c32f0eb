//! Resolved configuration and project lifecycle for one invocation

use std::path::PathBuf;

use forge_core::{FileProjectStore, ForgeConfig, ProjectId, ProjectLifecycle};
use forge_fs::{LockFile, NormalizedPath, RobustnessConfig, io};

use crate::error::{CliError, Result};

/// `{config_dir}/forge/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("forge").join("config.toml"))
}

pub struct Context {
    lifecycle: ProjectLifecycle<FileProjectStore>,
}

impl Context {
    /// Load configuration, letting `repo_dir` override the configured base directory.
    pub fn load(config: Option<PathBuf>, repo_dir: Option<PathBuf>) -> Result<Self> {
        let mut forge_config = match config.or_else(default_config_path) {
            Some(path) => ForgeConfig::load(&NormalizedPath::new(path))?,
            None => ForgeConfig::default(),
        };
        if let Some(repo_dir) = repo_dir {
            forge_config.repo_dir = NormalizedPath::new(repo_dir);
        }
        if forge_config.repo_dir.is_file() {
            return Err(CliError::user(format!(
                "Base directory {} is a file",
                forge_config.repo_dir
            )));
        }
        tracing::debug!(repo_dir = %forge_config.repo_dir, "Using base directory");

        let store = FileProjectStore::in_repo_dir(&forge_config.repo_dir);
        Ok(Self {
            lifecycle: ProjectLifecycle::new(forge_config, store),
        })
    }

    pub fn lifecycle(&self) -> &ProjectLifecycle<FileProjectStore> {
        &self.lifecycle
    }

    pub fn config(&self) -> &ForgeConfig {
        self.lifecycle.config()
    }

    /// Run `f` while holding the project's cross-process lock file.
    pub fn with_project_lock<T>(
        &self,
        id: ProjectId,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let _lock = LockFile::acquire(&self.config().lock_path(id))?;
        f()
    }

    /// Delete the lock file of a destroyed project.
    pub fn remove_project_lock(&self, id: ProjectId) -> Result<()> {
        let path = self.config().lock_path(id);
        if io::remove_tree(&path, RobustnessConfig::no_retry())? {
            tracing::debug!(path = %path, "Removed project lock file");
        }
        Ok(())
    }
}
