use forge_fs::{LockFile, NormalizedPath};
use tempfile::TempDir;

#[test]
fn test_try_acquire_contended() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(".locks/project.lock"));

    let held = LockFile::acquire(&path).unwrap();
    assert!(held.path().exists());

    let second = LockFile::try_acquire(&path).unwrap();
    assert!(second.is_none(), "lock should be contended while held");

    drop(held);
    let third = LockFile::try_acquire(&path).unwrap();
    assert!(third.is_some(), "lock should be free after drop");
}
