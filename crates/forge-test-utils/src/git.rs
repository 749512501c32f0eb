//! Commit helpers for satellite working trees.
//!
//! Commits are made with `git2` and a fixed signature so tests never depend
//! on the host's git configuration.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature, Time};

/// Commit time used by [`commit_file`].
pub const TEST_EPOCH: i64 = 1_700_000_000;

/// Write `file` under `workdir` and commit it onto `HEAD` at [`TEST_EPOCH`].
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn commit_file(workdir: &Path, file: &str, contents: &str, message: &str) -> Oid {
    commit_file_at(workdir, file, contents, message, TEST_EPOCH)
}

/// Like [`commit_file`] with an explicit commit time in seconds since the epoch.
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn commit_file_at(
    workdir: &Path,
    file: &str,
    contents: &str,
    message: &str,
    seconds: i64,
) -> Oid {
    let repo = Repository::open(workdir)
        .unwrap_or_else(|e| panic!("commit_file: cannot open {}: {e}", workdir.display()));

    let target = workdir.join(file);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&target, contents)
        .unwrap_or_else(|e| panic!("commit_file: failed to write {}: {e}", target.display()));

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = Signature::new("Forge Test", "test@forge.invalid", &Time::new(seconds, 0)).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_file: commit failed: {e}"))
}

/// All commit ids reachable from `HEAD`, newest first. Empty for an unborn HEAD.
///
/// # Panics
/// Panics if the repository cannot be opened or walked.
pub fn commit_ids(repo_path: &Path) -> Vec<Oid> {
    let repo = Repository::open(repo_path)
        .unwrap_or_else(|e| panic!("commit_ids: cannot open {}: {e}", repo_path.display()));
    let Ok(head) = repo.head() else {
        return Vec::new();
    };
    let tip = head.peel_to_commit().unwrap().id();

    let mut walk = repo.revwalk().unwrap();
    walk.push(tip).unwrap();
    walk.set_sorting(git2::Sort::TOPOLOGICAL).unwrap();
    walk.map(|oid| oid.unwrap()).collect()
}
