//! Project records as seen by the repository lifecycle

use std::fmt;
use std::str::FromStr;

use forge_fs::NormalizedPath;
use forge_git::ProjectLayout;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Unique identifier of a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a project starts empty or is seeded from another project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parent", rename_all = "kebab-case")]
pub enum Lineage {
    /// A root project with its own empty history
    #[default]
    Origin,
    /// A fork seeded from the parent's satellite
    ForkOf(ProjectId),
}

impl Lineage {
    /// Interpret a raw parent reference.
    ///
    /// No parent, or a parent equal to the project's own id, means origin.
    pub fn from_parent(id: ProjectId, parent: Option<ProjectId>) -> Self {
        match parent {
            Some(parent) if parent != id => Self::ForkOf(parent),
            _ => Self::Origin,
        }
    }

    pub fn parent(&self) -> Option<ProjectId> {
        match self {
            Self::Origin => None,
            Self::ForkOf(parent) => Some(*parent),
        }
    }
}

/// A stored project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    /// Path segment supplied by the identity service (username, email, ...)
    pub owner_namespace: String,

    /// Unique within `owner_namespace`
    pub name: String,

    #[serde(default)]
    pub lineage: Lineage,

    /// Recorded once when the path is assigned, never changed afterwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<NormalizedPath>,

    #[serde(default)]
    pub is_private: bool,
}

impl Project {
    /// Repository layout under the recorded root directory.
    pub fn layout(&self) -> Result<ProjectLayout> {
        self.root_dir
            .clone()
            .map(ProjectLayout::new)
            .ok_or(Error::PathNotAssigned { id: self.id })
    }
}

/// Fields needed to create a project record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub owner_namespace: String,
    pub name: String,
    pub lineage: Lineage,
    pub is_private: bool,
}

impl NewProject {
    pub fn origin(owner_namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner_namespace: owner_namespace.into(),
            name: name.into(),
            lineage: Lineage::Origin,
            is_private: false,
        }
    }

    pub fn fork(
        parent: ProjectId,
        owner_namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            lineage: Lineage::ForkOf(parent),
            ..Self::origin(owner_namespace, name)
        }
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Turn into a record with a fresh id and no root directory.
    pub fn into_project(self) -> Project {
        Project {
            id: ProjectId::new(),
            owner_namespace: self.owner_namespace,
            name: self.name,
            lineage: self.lineage,
            root_dir: None,
            is_private: self.is_private,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_reference_is_origin() {
        let id = ProjectId::new();
        assert_eq!(Lineage::from_parent(id, Some(id)), Lineage::Origin);
        assert_eq!(Lineage::from_parent(id, None), Lineage::Origin);

        let parent = ProjectId::new();
        assert_eq!(Lineage::from_parent(id, Some(parent)), Lineage::ForkOf(parent));
    }

    #[test]
    fn project_id_round_trips_through_strings() {
        let id = ProjectId::new();
        let parsed: ProjectId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ProjectId>().is_err());
    }

    #[test]
    fn layout_requires_root_dir() {
        let project = NewProject::origin("alice", "blog").into_project();
        assert!(matches!(project.layout(), Err(Error::PathNotAssigned { .. })));
    }

    #[test]
    fn lineage_serializes_with_kind_tag() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            lineage: Lineage,
        }
        let parent = ProjectId::new();
        let text = toml::to_string(&Wrapper {
            lineage: Lineage::ForkOf(parent),
        })
        .unwrap();
        assert!(text.contains("fork-of"), "got: {text}");

        let back: Wrapper = toml::from_str(&text).unwrap();
        assert_eq!(back.lineage, Lineage::ForkOf(parent));
    }
}
