//! Bare store and satellite repository lifecycle for Project Forge
//!
//! Every project owns two repositories under its root directory:
//!
//! ```text
//! {root}/repo.git            # bare store, the canonical push target
//! {root}/satellite/.git      # satellite, a working clone used for staging
//! ```
//!
//! This crate derives those paths, materializes both repositories (seeding
//! forks from their parent's satellite), pushes the satellite's primary
//! branch into the bare store, reads commit metadata, and removes the tree.

pub mod cleanup;
pub mod error;
pub mod history;
pub mod init;
pub mod layout;
pub mod metadata;
pub mod sync;

pub use cleanup::{CleanupOutcome, cleanup};
pub use error::{Error, Result};
pub use history::{CommitInfo, bare_history, list_recent_commits};
pub use init::{InitOptions, InitOutcome, Seed, initialize};
pub use layout::{BARE_REMOTE, DEFAULT_PRIMARY_BRANCH, ProjectLayout};
pub use metadata::{head_commit, head_is_unborn, last_updated};
pub use sync::{SyncOutcome, ensure_bare_remote, push_to_bare};
