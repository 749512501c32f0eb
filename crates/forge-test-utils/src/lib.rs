//! Shared test utilities for the forge workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: commit helpers for satellite working trees
//! - [`sandbox`]: [`ForgeSandbox`] temporary base directory

pub mod git;
pub mod sandbox;

pub use git::{TEST_EPOCH, commit_file, commit_file_at, commit_ids};
pub use sandbox::ForgeSandbox;
