//! End-to-end scenarios across the forge crates
//!
//! Each test drives a [`ProjectLifecycle`] over a persistent store and checks
//! the resulting repositories with git2 directly.

use forge_core::{
    FileProjectStore, ForgeConfig, Lineage, NewProject, ProjectLifecycle, ProjectLocks,
    ProjectStore,
};
use forge_fs::{LockFile, NormalizedPath};
use forge_git::{BARE_REMOTE, CleanupOutcome, SyncOutcome};
use forge_test_utils::{ForgeSandbox, commit_file, commit_ids};
use git2::Repository;
use pretty_assertions::assert_eq;

fn file_lifecycle(sandbox: &ForgeSandbox) -> ProjectLifecycle<FileProjectStore> {
    let config = ForgeConfig::with_repo_dir(sandbox.repo_dir());
    let store = FileProjectStore::in_repo_dir(&config.repo_dir);
    ProjectLifecycle::new(config, store)
}

/// alice/blog is created, receives commits, and is forked into alice/blog-fork.
#[test]
fn test_blog_and_fork_scenario() {
    let sandbox = ForgeSandbox::new();
    let forge = file_lifecycle(&sandbox);

    let blog = forge.create(NewProject::origin("alice", "blog")).unwrap().project;
    let root = NormalizedPath::new(sandbox.repo_dir()).join("repos/alice/blog");
    assert_eq!(forge.bare_path(blog.id).unwrap(), root.join("repo.git"));
    assert_eq!(forge.satellite_path(blog.id).unwrap(), root.join("satellite/.git"));

    let blog_wd = sandbox.repo_dir().join("repos/alice/blog/satellite");
    commit_file(&blog_wd, "README.md", "# Blog", "Initial");
    commit_file(&blog_wd, "posts/first.md", "Hello", "First post");
    assert!(matches!(
        forge.push_to_bare(blog.id).unwrap(),
        SyncOutcome::Pushed { previous: None, .. }
    ));

    let fork = forge
        .create(NewProject::fork(blog.id, "alice", "blog-fork"))
        .unwrap()
        .project;
    let fork_wd = sandbox.repo_dir().join("repos/alice/blog-fork/satellite");
    let history_at_fork = commit_ids(&blog_wd);
    assert_eq!(commit_ids(&fork_wd), history_at_fork);

    // The fork's satellite pushes to its own bare store only
    let fork_satellite = Repository::open(&fork_wd).unwrap();
    let bare_remote = fork_satellite.find_remote(BARE_REMOTE).unwrap();
    assert_eq!(
        bare_remote.url(),
        Some(forge.bare_path(fork.id).unwrap().as_str())
    );

    // Diverging afterwards leaves the parent untouched
    commit_file(&fork_wd, "posts/second.md", "Fork only", "Fork post");
    assert!(matches!(
        forge.push_to_bare(fork.id).unwrap(),
        SyncOutcome::Pushed { previous: Some(_), .. }
    ));
    assert_eq!(commit_ids(&blog_wd), history_at_fork);
    assert_eq!(
        commit_ids(&sandbox.repo_dir().join("repos/alice/blog/repo.git")),
        history_at_fork
    );

    let reopened = FileProjectStore::in_repo_dir(&forge.config().repo_dir);
    assert_eq!(
        reopened.get(fork.id).unwrap().unwrap().lineage,
        Lineage::ForkOf(blog.id)
    );
}

#[test]
fn test_destroy_then_recreate_same_name() {
    let sandbox = ForgeSandbox::new();
    let forge = file_lifecycle(&sandbox);

    let first = forge.create(NewProject::origin("bob", "notes")).unwrap().project;
    commit_file(
        &sandbox.repo_dir().join("repos/bob/notes/satellite"),
        "todo.md",
        "- [ ] write",
        "Todo",
    );
    forge.push_to_bare(first.id).unwrap();
    assert_eq!(forge.destroy(first.id).unwrap(), CleanupOutcome::Removed);

    let second = forge.create(NewProject::origin("bob", "notes")).unwrap().project;
    assert_ne!(first.id, second.id);
    assert_eq!(second.root_dir, first.root_dir);
    assert_eq!(forge.last_updated(second.id).unwrap(), None);
}

#[test]
fn test_two_lifecycles_share_locks_and_store() {
    let sandbox = ForgeSandbox::new();
    let locks = ProjectLocks::new();
    let a = file_lifecycle(&sandbox).with_locks(locks.clone());
    let b = file_lifecycle(&sandbox).with_locks(locks);

    let project = a.create(NewProject::origin("carol", "site")).unwrap().project;
    let workdir = sandbox.repo_dir().join("repos/carol/site/satellite");
    commit_file(&workdir, "index.html", "<h1>hi</h1>", "Initial");

    std::thread::scope(|scope| {
        let first = scope.spawn(|| a.push_to_bare(project.id).unwrap());
        let second = scope.spawn(|| b.push_to_bare(project.id).unwrap());
        let outcomes = [first.join().unwrap(), second.join().unwrap()];

        let pushed = outcomes
            .iter()
            .filter(|o| matches!(o, SyncOutcome::Pushed { .. }))
            .count();
        let up_to_date = outcomes
            .iter()
            .filter(|o| matches!(o, SyncOutcome::UpToDate { .. }))
            .count();
        assert_eq!((pushed, up_to_date), (1, 1));
    });

    assert!(b.last_updated(project.id).unwrap().is_some());
}

#[test]
fn test_project_lock_file_is_exclusive() {
    let sandbox = ForgeSandbox::new();
    let forge = file_lifecycle(&sandbox);
    let project = forge.create(NewProject::origin("dave", "app")).unwrap().project;

    let lock_path = forge.config().lock_path(project.id);
    let held = LockFile::acquire(&lock_path).unwrap();
    assert!(LockFile::try_acquire(&lock_path).unwrap().is_none());
    drop(held);
    assert!(LockFile::try_acquire(&lock_path).unwrap().is_some());
}
