//! Project lifecycle orchestration for Project Forge
//!
//! Ties the persistence collaborator to the repository lifecycle:
//!
//! - **Project model**: ids, [`Lineage`] (origin vs fork) and recorded root directory
//! - **Stores**: the [`ProjectStore`] seam with in-memory and TOML-file implementations
//! - **Locks**: per-project serialization of initialize / sync / cleanup
//! - **Lifecycle**: [`ProjectLifecycle`], the explicit workflow run after a
//!   record is created or destroyed
//!
//! # Architecture
//!
//! ```text
//!          forge-cli
//!              |
//!         forge-core
//!              |
//!       +------+------+
//!       |             |
//!   forge-git ---- forge-fs
//! ```
//!
//! Filesystem and git side effects never happen inside a store; callers
//! persist the record first and then invoke the lifecycle explicitly.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod locks;
pub mod project;
pub mod store;

pub use config::ForgeConfig;
pub use error::{Error, Result};
pub use lifecycle::{CreateReport, ProjectLifecycle};
pub use locks::ProjectLocks;
pub use project::{Lineage, NewProject, Project, ProjectId};
pub use store::{FileProjectStore, MemoryProjectStore, ProjectStore};
