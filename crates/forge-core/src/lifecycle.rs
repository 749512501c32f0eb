//! Explicit project lifecycle workflow
//!
//! The persistence layer only stores records. After a record is durably
//! created, [`ProjectLifecycle::on_created`] assigns its path and
//! materializes the repositories; after it is destroyed,
//! [`ProjectLifecycle::on_destroyed`] removes the tree. All repository work
//! for one project runs under that project's lock.

use chrono::{DateTime, Utc};
use forge_fs::{NormalizedPath, RobustnessConfig, io};
use forge_git::{CleanupOutcome, CommitInfo, InitOutcome, ProjectLayout, Seed, SyncOutcome};

use crate::{
    Error, ForgeConfig, Lineage, NewProject, Project, ProjectId, ProjectLocks, ProjectStore, Result,
};

/// Result of [`ProjectLifecycle::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    /// The stored record, root directory included
    pub project: Project,
    pub outcome: InitOutcome,
}

/// Orchestrates records in `S` and the repositories on disk.
pub struct ProjectLifecycle<S> {
    config: ForgeConfig,
    store: S,
    locks: ProjectLocks,
}

impl<S: ProjectStore> ProjectLifecycle<S> {
    pub fn new(config: ForgeConfig, store: S) -> Self {
        Self {
            config,
            store,
            locks: ProjectLocks::new(),
        }
    }

    /// Share a lock registry with other lifecycles over the same projects.
    pub fn with_locks(mut self, locks: ProjectLocks) -> Self {
        self.locks = locks;
        self
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn require(&self, id: ProjectId) -> Result<Project> {
        self.store.get(id)?.ok_or(Error::ProjectNotFound { id })
    }

    /// Layout of a stored project with an assigned root directory.
    pub fn layout(&self, id: ProjectId) -> Result<ProjectLayout> {
        self.require(id)?.layout()
    }

    /// `{root}/repo.git` of a stored project.
    pub fn bare_path(&self, id: ProjectId) -> Result<NormalizedPath> {
        Ok(self.layout(id)?.bare_path().clone())
    }

    /// `{root}/satellite/.git` of a stored project.
    pub fn satellite_path(&self, id: ProjectId) -> Result<NormalizedPath> {
        Ok(self.layout(id)?.satellite_path().clone())
    }

    /// Compute the project's root directory and record it in the store.
    pub fn assign_path(&self, project: &Project) -> Result<ProjectLayout> {
        if project.root_dir.is_some() {
            return Err(Error::PathAlreadyAssigned { id: project.id });
        }
        let layout =
            ProjectLayout::resolve(&self.config.repo_dir, &project.owner_namespace, &project.name)?;
        self.store.set_root_dir(project.id, layout.root().clone())?;
        tracing::debug!(id = %project.id, path = %layout.root(), "Assigned project path");
        Ok(layout)
    }

    fn parent_layout(&self, lineage: Lineage) -> Result<Option<ProjectLayout>> {
        let Some(parent) = lineage.parent() else {
            return Ok(None);
        };
        let layout = self
            .store
            .get(parent)?
            .and_then(|p| p.layout().ok())
            .filter(ProjectLayout::is_initialized)
            .ok_or(Error::UnresolvedParent { parent })?;
        Ok(Some(layout))
    }

    /// Materialize the bare store and satellite of a stored project.
    ///
    /// Returns [`InitOutcome::RootMissing`] if the root directory does not
    /// exist. Refuses to touch a root that already holds repositories.
    pub fn initialize(&self, id: ProjectId) -> Result<InitOutcome> {
        let project = self.require(id)?;
        let layout = project.layout()?;
        let parent = self.parent_layout(project.lineage)?;
        let seed = match &parent {
            Some(parent) => Seed::ForkOf(parent),
            None => Seed::Origin,
        };

        self.locks.with_lock(id, || -> Result<InitOutcome> {
            if layout.bare_path().exists() || layout.satellite_path().exists() {
                return Err(Error::AlreadyInitialized {
                    id,
                    path: layout.root().to_native(),
                });
            }
            Ok(forge_git::initialize(&layout, seed, &self.config.init_options())?)
        })
    }

    /// Workflow run after a record has been durably created.
    ///
    /// Assigns the path if needed, provisions the root directory when
    /// configured to, and initializes. On failure the partial tree is
    /// removed if `rollback_on_failure` is set.
    pub fn on_created(&self, id: ProjectId) -> Result<InitOutcome> {
        let project = self.require(id)?;
        let layout = match &project.root_dir {
            Some(root) => ProjectLayout::new(root.clone()),
            None => self.assign_path(&project)?,
        };

        if self.config.provision_roots {
            io::ensure_dir(layout.root())?;
        }

        match self.initialize(id) {
            Ok(outcome) => Ok(outcome),
            Err(err @ Error::AlreadyInitialized { .. }) => Err(err),
            Err(err) => {
                if self.config.rollback_on_failure {
                    tracing::warn!(
                        id = %id,
                        error = %err,
                        "Initialization failed, removing partial tree"
                    );
                    if let Err(cleanup_err) = self.cleanup_layout(id, &layout) {
                        tracing::warn!(id = %id, error = %cleanup_err, "Rollback cleanup failed");
                    }
                }
                Err(err)
            }
        }
    }

    /// Store a new record and run [`on_created`](Self::on_created) for it.
    ///
    /// With `rollback_on_failure`, a failed initialization also deletes the record.
    pub fn create(&self, new: NewProject) -> Result<CreateReport> {
        let project = self.store.insert(new)?;
        tracing::info!(
            id = %project.id,
            owner = %project.owner_namespace,
            name = %project.name,
            "Creating project"
        );

        let outcome = match self.on_created(project.id) {
            Ok(outcome) => outcome,
            Err(err) => {
                if self.config.rollback_on_failure {
                    self.store.remove(project.id)?;
                }
                return Err(err);
            }
        };

        Ok(CreateReport {
            project: self.require(project.id)?,
            outcome,
        })
    }

    /// Workflow run after a record has been destroyed.
    pub fn on_destroyed(&self, project: &Project) -> Result<CleanupOutcome> {
        let outcome = match project.layout() {
            Ok(layout) => self.cleanup_layout(project.id, &layout)?,
            Err(_) => CleanupOutcome::AlreadyAbsent,
        };
        self.locks.forget(project.id);
        Ok(outcome)
    }

    /// Delete the record, then its tree.
    pub fn destroy(&self, id: ProjectId) -> Result<CleanupOutcome> {
        let project = self.store.remove(id)?.ok_or(Error::ProjectNotFound { id })?;
        tracing::info!(id = %id, "Destroying project");
        self.on_destroyed(&project)
    }

    fn cleanup_layout(&self, id: ProjectId, layout: &ProjectLayout) -> Result<CleanupOutcome> {
        self.locks
            .with_lock(id, || forge_git::cleanup(layout, RobustnessConfig::default()))
            .map_err(Error::from)
    }

    /// Push the project's satellite into its bare store.
    pub fn push_to_bare(&self, id: ProjectId) -> Result<SyncOutcome> {
        let layout = self.layout(id)?;
        self.locks
            .with_lock(id, || forge_git::push_to_bare(&layout, &self.config.primary_branch))
            .map_err(Error::from)
    }

    /// Commit time of the bare store's head, or `None` if there is no history yet.
    pub fn last_updated(&self, id: ProjectId) -> Result<Option<DateTime<Utc>>> {
        let layout = self.layout(id)?;
        match forge_git::last_updated(&layout) {
            Ok(time) => Ok(Some(time)),
            Err(forge_git::Error::RepositoryUnavailable { message, .. }) => {
                tracing::debug!(id = %id, reason = %message, "No update history");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Up to `max_count` commits of the bare store's primary branch, newest first.
    pub fn recent_commits(&self, id: ProjectId, max_count: usize) -> Result<Vec<CommitInfo>> {
        let layout = self.layout(id)?;
        match forge_git::bare_history(&layout, &self.config.primary_branch, max_count) {
            Ok(commits) => Ok(commits),
            Err(forge_git::Error::RepositoryUnavailable { .. }) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
