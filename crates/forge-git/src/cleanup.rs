//! Removing a project's on-disk tree

use forge_fs::{RobustnessConfig, io};

use crate::{ProjectLayout, Result};

/// What [`cleanup`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    AlreadyAbsent,
}

/// Recursively delete the project root, bare store and satellite included.
///
/// A root that is already gone is not an error.
pub fn cleanup(layout: &ProjectLayout, robustness: RobustnessConfig) -> Result<CleanupOutcome> {
    let removed = io::remove_tree(layout.root(), robustness)?;
    let outcome = if removed {
        CleanupOutcome::Removed
    } else {
        CleanupOutcome::AlreadyAbsent
    };
    tracing::info!(root = %layout.root(), outcome = ?outcome, "Project tree cleaned up");
    Ok(outcome)
}
