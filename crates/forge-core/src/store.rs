//! Persistence collaborator seam and its implementations
//!
//! Stores only keep records. They never touch repositories; the
//! [`ProjectLifecycle`](crate::ProjectLifecycle) does that after a store
//! call succeeds.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use forge_fs::{ForgePath, LockFile, NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::{Error, NewProject, Project, ProjectId, Result};

/// Record storage for projects.
pub trait ProjectStore: Send + Sync {
    /// Look up a record by id.
    fn get(&self, id: ProjectId) -> Result<Option<Project>>;

    /// Create a record with a fresh id.
    ///
    /// Fails with [`Error::DuplicateName`] if the owner already has a
    /// project with that name.
    fn insert(&self, new: NewProject) -> Result<Project>;

    /// Record the root directory. Fails with
    /// [`Error::PathAlreadyAssigned`] on a second call.
    fn set_root_dir(&self, id: ProjectId, root: NormalizedPath) -> Result<()>;

    /// Delete a record, returning it if it existed.
    fn remove(&self, id: ProjectId) -> Result<Option<Project>>;

    /// All records, ordered by owner then name.
    fn list(&self) -> Result<Vec<Project>>;
}

/// The record set shared by both store implementations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Registry {
    #[serde(default)]
    projects: BTreeMap<ProjectId, Project>,
}

impl Registry {
    fn insert(&mut self, new: NewProject) -> Result<Project> {
        let taken = self
            .projects
            .values()
            .any(|p| p.owner_namespace == new.owner_namespace && p.name == new.name);
        if taken {
            return Err(Error::DuplicateName {
                owner: new.owner_namespace,
                name: new.name,
            });
        }
        let project = new.into_project();
        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    fn set_root_dir(&mut self, id: ProjectId, root: NormalizedPath) -> Result<()> {
        let project = self
            .projects
            .get_mut(&id)
            .ok_or(Error::ProjectNotFound { id })?;
        if project.root_dir.is_some() {
            return Err(Error::PathAlreadyAssigned { id });
        }
        project.root_dir = Some(root);
        Ok(())
    }

    fn list(&self) -> Vec<Project> {
        let mut projects: Vec<_> = self.projects.values().cloned().collect();
        projects.sort_by(|a, b| {
            let key_a = (a.owner_namespace.as_str(), a.name.as_str());
            key_a.cmp(&(b.owner_namespace.as_str(), b.name.as_str()))
        });
        projects
    }
}

/// In-process store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    registry: Mutex<Registry>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_registry<T>(&self, f: impl FnOnce(&mut Registry) -> Result<T>) -> Result<T> {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }
}

impl ProjectStore for MemoryProjectStore {
    fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        self.with_registry(|r| Ok(r.projects.get(&id).cloned()))
    }

    fn insert(&self, new: NewProject) -> Result<Project> {
        self.with_registry(|r| r.insert(new))
    }

    fn set_root_dir(&self, id: ProjectId, root: NormalizedPath) -> Result<()> {
        self.with_registry(|r| r.set_root_dir(id, root))
    }

    fn remove(&self, id: ProjectId) -> Result<Option<Project>> {
        self.with_registry(|r| Ok(r.projects.remove(&id)))
    }

    fn list(&self) -> Result<Vec<Project>> {
        self.with_registry(|r| Ok(r.list()))
    }
}

/// Store persisted as a TOML file, shared safely between processes.
///
/// Every access takes an exclusive advisory lock on `{file}.lock`; writes go
/// through write-temp-then-rename.
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    path: NormalizedPath,
    lock_path: NormalizedPath,
}

impl FileProjectStore {
    /// Store backed by the TOML file at `path`.
    pub fn new(path: NormalizedPath) -> Self {
        let lock_path = NormalizedPath::new(format!("{}.lock", path.as_str()));
        Self { path, lock_path }
    }

    /// Store at `{repo_dir}/projects.toml`, lock under `{repo_dir}/.locks`.
    pub fn in_repo_dir(repo_dir: &NormalizedPath) -> Self {
        Self {
            path: repo_dir.join("projects.toml"),
            lock_path: repo_dir.join(ForgePath::LocksDir.as_str()).join("projects.lock"),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    fn load(&self) -> Result<Registry> {
        if !self.path.exists() {
            return Ok(Registry::default());
        }
        let content = io::read_text(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn read<T>(&self, f: impl FnOnce(&Registry) -> T) -> Result<T> {
        let _lock = LockFile::acquire(&self.lock_path)?;
        let registry = self.load()?;
        Ok(f(&registry))
    }

    fn update<T>(&self, f: impl FnOnce(&mut Registry) -> Result<T>) -> Result<T> {
        let _lock = LockFile::acquire(&self.lock_path)?;
        let mut registry = self.load()?;
        let value = f(&mut registry)?;
        let content = toml::to_string_pretty(&registry)?;
        io::write_text(&self.path, &content)?;
        Ok(value)
    }
}

impl ProjectStore for FileProjectStore {
    fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        self.read(|r| r.projects.get(&id).cloned())
    }

    fn insert(&self, new: NewProject) -> Result<Project> {
        let project = self.update(|r| r.insert(new))?;
        tracing::debug!(id = %project.id, path = %self.path, "Project record created");
        Ok(project)
    }

    fn set_root_dir(&self, id: ProjectId, root: NormalizedPath) -> Result<()> {
        self.update(|r| r.set_root_dir(id, root))
    }

    fn remove(&self, id: ProjectId) -> Result<Option<Project>> {
        self.update(|r| Ok(r.projects.remove(&id)))
    }

    fn list(&self) -> Result<Vec<Project>> {
        self.read(Registry::list)
    }
}
