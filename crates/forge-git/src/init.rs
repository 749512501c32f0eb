//! Materializing a project's bare store and satellite clone

use git2::build::RepoBuilder;
use git2::{Repository, RepositoryInitOptions};

use crate::metadata::head_is_unborn;
use crate::sync::{SyncOutcome, ensure_bare_remote, push_branch};
use crate::{DEFAULT_PRIMARY_BRANCH, Error, ProjectLayout, Result};

/// Where the satellite's initial content comes from.
#[derive(Debug, Clone, Copy)]
pub enum Seed<'a> {
    /// A root project: the satellite is cloned from its own empty bare store
    Origin,
    /// A fork: the satellite is cloned from the parent's satellite
    ForkOf(&'a ProjectLayout),
}

/// Settings for [`initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Branch that the bare store's HEAD points at and that gets pushed
    pub primary_branch: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            primary_branch: DEFAULT_PRIMARY_BRANCH.to_string(),
        }
    }
}

/// Result of a successful [`initialize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Both repositories exist; `sync` reports the initial push
    Initialized { sync: SyncOutcome },
    /// The project root directory does not exist, nothing was done
    RootMissing,
}

/// Create the bare store and the satellite clone for `layout`.
///
/// The root directory must already exist; otherwise this returns
/// [`InitOutcome::RootMissing`] without touching the disk. Any git failure
/// is returned as an error and may leave a partial tree behind that the
/// caller has to remove.
pub fn initialize(
    layout: &ProjectLayout,
    seed: Seed<'_>,
    options: &InitOptions,
) -> Result<InitOutcome> {
    if !layout.root().is_dir() {
        tracing::warn!(root = %layout.root(), "Project root missing, skipping initialization");
        return Ok(InitOutcome::RootMissing);
    }

    let source = match seed {
        Seed::Origin => layout.bare_path().clone(),
        Seed::ForkOf(parent) => {
            if !parent.satellite_path().is_dir() {
                return Err(Error::ParentUninitialized {
                    path: parent.satellite_path().to_native(),
                });
            }
            parent.satellite_path().clone()
        }
    };
    tracing::debug!(root = %layout.root(), source = %source, "Initializing project repositories");

    let bare = create_bare(layout, &options.primary_branch)?;

    let satellite = RepoBuilder::new()
        .clone(source.as_str(), &layout.satellite_workdir().to_native())
        .map_err(|e| Error::creation(layout.satellite_path().to_native(), &e))?;

    let unborn = head_is_unborn(&satellite)?;
    if unborn {
        // An empty clone has no remote default branch to follow
        satellite.set_head(&format!("refs/heads/{}", options.primary_branch))?;
    }
    ensure_bare_remote(&satellite, layout)?;

    let sync = if unborn {
        SyncOutcome::NothingToSync
    } else {
        push_branch(&satellite, &bare, layout, &options.primary_branch)?
    };

    tracing::info!(root = %layout.root(), sync = ?sync, "Project repositories initialized");
    Ok(InitOutcome::Initialized { sync })
}

fn create_bare(layout: &ProjectLayout, primary_branch: &str) -> Result<Repository> {
    let mut opts = RepositoryInitOptions::new();
    opts.bare(true)
        .no_reinit(true)
        .mkdir(true)
        .initial_head(primary_branch);

    Repository::init_opts(layout.bare_path().to_native(), &opts)
        .map_err(|e| Error::creation(layout.bare_path().to_native(), &e))
}
