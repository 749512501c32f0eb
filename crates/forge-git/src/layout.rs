//! On-disk locations of a project's repositories

use forge_fs::{ForgePath, NormalizedPath, validate_segment};

use crate::Result;

/// Name of the satellite remote that points at its own bare store.
pub const BARE_REMOTE: &str = "bare";

/// Primary branch pushed from the satellite into the bare store.
pub const DEFAULT_PRIMARY_BRANCH: &str = "master";

/// Paths of one project's bare store and satellite clone.
///
/// ```text
/// {root}/
/// ├── repo.git/        # bare store
/// └── satellite/       # satellite working directory
///     └── .git/        # satellite repository
/// ```
///
/// All paths are derived from `root`; nothing else is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectLayout {
    root: NormalizedPath,
    bare: NormalizedPath,
    satellite_workdir: NormalizedPath,
    satellite: NormalizedPath,
}

impl ProjectLayout {
    /// Layout for an already-known project root directory.
    pub fn new(root: NormalizedPath) -> Self {
        let bare = root.join(ForgePath::BareRepo.as_str());
        let satellite_workdir = root.join(ForgePath::SatelliteDir.as_str());
        let satellite = satellite_workdir.join(ForgePath::GitDir.as_str());

        Self {
            root,
            bare,
            satellite_workdir,
            satellite,
        }
    }

    /// Root directory for `name` owned by `owner_namespace` under `repo_dir`.
    ///
    /// Pure: does not validate or touch the filesystem.
    pub fn project_root(
        repo_dir: &NormalizedPath,
        owner_namespace: &str,
        name: &str,
    ) -> NormalizedPath {
        repo_dir
            .join(ForgePath::ReposDir.as_str())
            .join(owner_namespace)
            .join(name)
    }

    /// Validate both segments, then build the layout for that project.
    pub fn resolve(repo_dir: &NormalizedPath, owner_namespace: &str, name: &str) -> Result<Self> {
        validate_segment("owner namespace", owner_namespace)?;
        validate_segment("project name", name)?;
        Ok(Self::new(Self::project_root(repo_dir, owner_namespace, name)))
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// `{root}/repo.git`
    pub fn bare_path(&self) -> &NormalizedPath {
        &self.bare
    }

    /// `{root}/satellite`
    pub fn satellite_workdir(&self) -> &NormalizedPath {
        &self.satellite_workdir
    }

    /// `{root}/satellite/.git`
    pub fn satellite_path(&self) -> &NormalizedPath {
        &self.satellite
    }

    /// A file inside the satellite working tree.
    pub fn asset_path(&self, relative: &str) -> NormalizedPath {
        self.satellite_workdir.join(relative.trim_start_matches('/'))
    }

    /// Whether both repositories are present on disk.
    pub fn is_initialized(&self) -> bool {
        self.bare.is_dir() && self.satellite.is_dir()
    }
}
