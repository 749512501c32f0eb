//! Advisory lock files for cross-process mutual exclusion

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// An exclusive advisory lock held on a file until dropped.
#[derive(Debug)]
pub struct LockFile {
    file: File,
    path: PathBuf,
}

impl LockFile {
    fn open(path: &NormalizedPath) -> Result<(File, PathBuf)> {
        let native = path.to_native();
        if let Some(parent) = native.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&native)
            .map_err(|e| Error::io(&native, e))?;
        Ok((file, native))
    }

    /// Block until the lock is acquired.
    pub fn acquire(path: &NormalizedPath) -> Result<Self> {
        let (file, native) = Self::open(path)?;
        file.lock_exclusive()
            .map_err(|_| Error::LockFailed { path: native.clone() })?;
        tracing::trace!(path = %path, "Lock acquired");
        Ok(Self { file, path: native })
    }

    /// Acquire the lock only if nobody else holds it.
    pub fn try_acquire(path: &NormalizedPath) -> Result<Option<Self>> {
        let (file, native) = Self::open(path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file, path: native })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(_) => Err(Error::LockFailed { path: native }),
        }
    }

    /// Path of the underlying lock file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release lock");
        }
    }
}
