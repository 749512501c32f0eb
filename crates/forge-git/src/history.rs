//! Recent commit history extraction from git repositories.

use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository};

use crate::{Error, ProjectLayout, Result};

/// Information about a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit id
    pub id: Oid,

    /// Short commit hash (7 characters)
    pub short_id: String,

    /// First line of the commit message
    pub summary: String,

    /// Commit author name
    pub author: String,

    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

/// Extract the last `max_count` commits from `branch`.
///
/// Performs a time-sorted revwalk starting from the tip of `branch` and
/// returns commits most recent first. A branch without commits yields an
/// empty list.
pub fn list_recent_commits(
    repo: &Repository,
    branch: &str,
    max_count: usize,
) -> Result<Vec<CommitInfo>> {
    let reference = match repo.find_reference(&format!("refs/heads/{branch}")) {
        Ok(r) => r,
        Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let commit = reference.peel_to_commit()?;

    let mut revwalk = repo.revwalk()?;
    revwalk.push(commit.id())?;
    revwalk.set_sorting(git2::Sort::TIME)?;

    let mut commits = Vec::with_capacity(max_count.min(64));

    for oid_result in revwalk.take(max_count) {
        let oid = oid_result?;
        let commit = repo.find_commit(oid)?;

        let timestamp = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .unwrap_or_default();

        let summary = commit.summary().unwrap_or("").to_string();
        let author = commit.author().name().unwrap_or("Unknown").to_string();

        commits.push(CommitInfo {
            id: oid,
            short_id: format!("{:.7}", oid),
            summary,
            author,
            timestamp,
        });
    }

    Ok(commits)
}

/// Recent commits on `branch` of the project's bare store.
pub fn bare_history(
    layout: &ProjectLayout,
    branch: &str,
    max_count: usize,
) -> Result<Vec<CommitInfo>> {
    let path = layout.bare_path().to_native();
    let bare = Repository::open_bare(&path).map_err(|e| Error::unavailable(&path, e.message()))?;
    list_recent_commits(&bare, branch, max_count)
}
