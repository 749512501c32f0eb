//! Read-only facts derived from a project's repositories

use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Oid, Repository};

use crate::{Error, ProjectLayout, Result};
use forge_fs::NormalizedPath;

/// Commit time of the bare store's HEAD.
///
/// Fails with [`Error::RepositoryUnavailable`] when the bare store is
/// missing or has no commits yet.
pub fn last_updated(layout: &ProjectLayout) -> Result<DateTime<Utc>> {
    let path = layout.bare_path().to_native();
    let bare = Repository::open_bare(&path).map_err(|e| Error::unavailable(&path, e.message()))?;

    let head = bare.head().map_err(|e| match e.code() {
        ErrorCode::UnbornBranch | ErrorCode::NotFound => {
            Error::unavailable(&path, "no commits yet")
        }
        _ => Error::unavailable(&path, e.message()),
    })?;
    let commit = head.peel_to_commit()?;

    let time = commit.time();
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .ok_or_else(|| Error::unavailable(&path, format!("invalid commit time {}", time.seconds())))
}

/// Tip of HEAD for the repository at `path`, or `None` if HEAD is unborn.
pub fn head_commit(path: &NormalizedPath) -> Result<Option<Oid>> {
    let native = path.to_native();
    let repo = Repository::open(&native).map_err(|e| Error::unavailable(&native, e.message()))?;

    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether HEAD of `repo` points at a branch that has no commits yet.
pub fn head_is_unborn(repo: &Repository) -> Result<bool> {
    match repo.head() {
        Ok(_) => Ok(false),
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(true),
        Err(e) => Err(e.into()),
    }
}
