//! Tests for the explicit create / push / destroy workflow

use chrono::{TimeZone, Utc};
use forge_core::{
    Error, ForgeConfig, Lineage, MemoryProjectStore, NewProject, ProjectId, ProjectLifecycle,
    ProjectLocks, ProjectStore,
};
use forge_fs::NormalizedPath;
use forge_git::{CleanupOutcome, InitOutcome, SyncOutcome, head_commit};
use forge_test_utils::{ForgeSandbox, TEST_EPOCH, commit_file, commit_ids};
use pretty_assertions::assert_eq;
use std::fs;

fn lifecycle(sandbox: &ForgeSandbox) -> ProjectLifecycle<MemoryProjectStore> {
    ProjectLifecycle::new(
        ForgeConfig::with_repo_dir(sandbox.repo_dir()),
        MemoryProjectStore::new(),
    )
}

#[test]
fn test_create_origin_assigns_path_and_initializes() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);

    let report = forge.create(NewProject::origin("alice", "blog")).unwrap();

    let expected_root = NormalizedPath::new(sandbox.repo_dir().join("repos/alice/blog"));
    assert_eq!(report.project.root_dir.as_ref(), Some(&expected_root));
    assert_eq!(
        report.outcome,
        InitOutcome::Initialized {
            sync: SyncOutcome::NothingToSync
        }
    );
    assert_eq!(
        forge.bare_path(report.project.id).unwrap(),
        expected_root.join("repo.git")
    );
    assert_eq!(
        forge.satellite_path(report.project.id).unwrap(),
        expected_root.join("satellite/.git")
    );
    assert!(forge.layout(report.project.id).unwrap().is_initialized());
}

#[test]
fn test_last_updated_none_until_first_sync() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let project = forge.create(NewProject::origin("alice", "blog")).unwrap().project;

    assert_eq!(forge.last_updated(project.id).unwrap(), None);

    let layout = project.layout().unwrap();
    let workdir = layout.satellite_workdir().to_native();
    let tip = commit_file(&workdir, "README.md", "# Blog", "Initial");
    assert_eq!(
        forge.push_to_bare(project.id).unwrap(),
        SyncOutcome::Pushed { previous: None, tip }
    );
    assert_eq!(
        forge.last_updated(project.id).unwrap(),
        Some(Utc.timestamp_opt(TEST_EPOCH, 0).unwrap())
    );
    assert_eq!(
        forge.push_to_bare(project.id).unwrap(),
        SyncOutcome::UpToDate { tip }
    );

    let commits = forge.recent_commits(project.id, 5).unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].id, tip);
}

#[test]
fn test_fork_scenario_copies_parent_history() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let blog = forge.create(NewProject::origin("alice", "blog")).unwrap().project;
    let blog_wd = blog.layout().unwrap().satellite_workdir().to_native();
    commit_file(&blog_wd, "README.md", "# Blog", "Initial");
    commit_file(&blog_wd, "post.md", "hello", "Post");
    forge.push_to_bare(blog.id).unwrap();

    let fork = forge
        .create(NewProject::fork(blog.id, "alice", "blog-fork"))
        .unwrap()
        .project;

    assert_eq!(fork.lineage, Lineage::ForkOf(blog.id));
    let fork_layout = fork.layout().unwrap();
    assert_eq!(
        commit_ids(&fork_layout.satellite_workdir().to_native()),
        commit_ids(&blog_wd)
    );
    assert_eq!(
        head_commit(fork_layout.bare_path()).unwrap(),
        head_commit(blog.layout().unwrap().satellite_path()).unwrap()
    );
    assert!(forge.last_updated(fork.id).unwrap().is_some());
}

#[test]
fn test_fork_of_unknown_parent_rolls_back() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let ghost = ProjectId::new();

    let result = forge.create(NewProject::fork(ghost, "bob", "copy"));

    assert!(
        matches!(result, Err(Error::UnresolvedParent { parent }) if parent == ghost),
        "got {result:?}"
    );
    sandbox.assert_absent(&sandbox.repo_dir().join("repos/bob/copy"));
    assert!(forge.store().list().unwrap().is_empty());
}

#[test]
fn test_fork_of_uninitialized_parent_is_unresolved() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    // Record exists but was never initialized
    let parent = forge
        .store()
        .insert(NewProject::origin("alice", "draft"))
        .unwrap();

    let result = forge.create(NewProject::fork(parent.id, "bob", "copy"));
    assert!(matches!(result, Err(Error::UnresolvedParent { .. })), "got {result:?}");
}

#[test]
fn test_clone_failure_removes_partial_fork() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let parent = forge.create(NewProject::origin("alice", "blog")).unwrap().project;

    // Still a directory, but no longer a repository to clone from
    let parent_git = parent.layout().unwrap().satellite_path().to_native();
    fs::remove_dir_all(&parent_git).unwrap();
    fs::create_dir(&parent_git).unwrap();

    let result = forge.create(NewProject::fork(parent.id, "bob", "copy"));

    assert!(
        matches!(
            result,
            Err(Error::Git(forge_git::Error::RepositoryCreation { .. }))
        ),
        "got {result:?}"
    );
    sandbox.assert_absent(&sandbox.repo_dir().join("repos/bob/copy"));
    let remaining = forge.store().list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, parent.id);
}

#[test]
fn test_failure_without_rollback_keeps_record_and_tree() {
    let sandbox = ForgeSandbox::new();
    let config = ForgeConfig {
        rollback_on_failure: false,
        ..ForgeConfig::with_repo_dir(sandbox.repo_dir())
    };
    let forge = ProjectLifecycle::new(config, MemoryProjectStore::new());

    let result = forge.create(NewProject::fork(ProjectId::new(), "bob", "copy"));

    assert!(result.is_err());
    assert_eq!(forge.store().list().unwrap().len(), 1);
    assert!(sandbox.repo_dir().join("repos/bob/copy").is_dir());
}

#[test]
fn test_missing_root_without_provisioning_is_reported() {
    let sandbox = ForgeSandbox::new();
    let config = ForgeConfig {
        provision_roots: false,
        ..ForgeConfig::with_repo_dir(sandbox.repo_dir())
    };
    let forge = ProjectLifecycle::new(config, MemoryProjectStore::new());

    let report = forge.create(NewProject::origin("alice", "blog")).unwrap();

    assert_eq!(report.outcome, InitOutcome::RootMissing);
    assert!(report.project.root_dir.is_some());
    assert_eq!(forge.last_updated(report.project.id).unwrap(), None);
    assert!(forge.recent_commits(report.project.id, 5).unwrap().is_empty());
}

#[test]
fn test_initialize_refuses_existing_repositories() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let project = forge.create(NewProject::origin("alice", "blog")).unwrap().project;
    let layout = project.layout().unwrap();
    commit_file(&layout.satellite_workdir().to_native(), "README.md", "keep", "Keep me");

    let result = forge.initialize(project.id);

    assert!(matches!(result, Err(Error::AlreadyInitialized { .. })), "got {result:?}");
    assert!(layout.asset_path("README.md").is_file());
}

#[test]
fn test_assign_path_only_once() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let project = forge.create(NewProject::origin("alice", "blog")).unwrap().project;

    let result = forge.assign_path(&project);
    assert!(matches!(result, Err(Error::PathAlreadyAssigned { .. })));
}

#[test]
fn test_unsafe_name_is_rejected_before_touching_disk() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);

    let result = forge.create(NewProject::origin("alice", "../escape"));

    assert!(
        matches!(
            result,
            Err(Error::Git(forge_git::Error::Fs(forge_fs::Error::InvalidSegment { .. })))
        ),
        "got {result:?}"
    );
    sandbox.assert_absent(&sandbox.repo_dir().join("repos"));
}

#[test]
fn test_duplicate_name_per_owner() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    forge.create(NewProject::origin("alice", "blog")).unwrap();

    let duplicate = forge.create(NewProject::origin("alice", "blog"));
    assert!(matches!(duplicate, Err(Error::DuplicateName { .. })));

    // Same name under another owner is fine
    forge.create(NewProject::origin("bob", "blog")).unwrap();
}

#[test]
fn test_destroy_removes_tree_and_record() {
    let sandbox = ForgeSandbox::new();
    let locks = ProjectLocks::new();
    let forge = lifecycle(&sandbox).with_locks(locks.clone());
    let project = forge.create(NewProject::origin("alice", "blog")).unwrap().project;
    let layout = project.layout().unwrap();

    assert_eq!(forge.destroy(project.id).unwrap(), CleanupOutcome::Removed);

    assert!(!layout.bare_path().exists());
    assert!(!layout.satellite_path().exists());
    assert!(matches!(
        forge.destroy(project.id),
        Err(Error::ProjectNotFound { .. })
    ));
    assert!(locks.is_empty());
}

#[test]
fn test_on_destroyed_twice_is_noop() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let project = forge.create(NewProject::origin("alice", "blog")).unwrap().project;

    assert_eq!(forge.on_destroyed(&project).unwrap(), CleanupOutcome::Removed);
    assert_eq!(
        forge.on_destroyed(&project).unwrap(),
        CleanupOutcome::AlreadyAbsent
    );
}

#[test]
fn test_destroying_parent_leaves_fork_intact() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);
    let blog = forge.create(NewProject::origin("alice", "blog")).unwrap().project;
    commit_file(
        &blog.layout().unwrap().satellite_workdir().to_native(),
        "README.md",
        "x",
        "Initial",
    );
    let fork = forge
        .create(NewProject::fork(blog.id, "bob", "blog"))
        .unwrap()
        .project;

    forge.destroy(blog.id).unwrap();

    let fork_layout = fork.layout().unwrap();
    assert!(fork_layout.is_initialized());
    assert!(fs::read_dir(fork_layout.satellite_workdir().to_native()).is_ok());
    assert!(forge.push_to_bare(fork.id).is_ok());
}

#[test]
fn test_parallel_creates_for_distinct_projects() {
    let sandbox = ForgeSandbox::new();
    let forge = lifecycle(&sandbox);

    std::thread::scope(|scope| {
        for i in 0..4 {
            let forge = &forge;
            scope.spawn(move || {
                forge
                    .create(NewProject::origin("alice", format!("project-{i}")))
                    .unwrap();
            });
        }
    });

    let projects = forge.store().list().unwrap();
    assert_eq!(projects.len(), 4);
    for project in projects {
        assert!(project.layout().unwrap().is_initialized());
    }
}
