//! Per-project mutual exclusion

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ProjectId;

/// In-process registry of one mutex per project.
///
/// Operations on the same project run one at a time; different projects
/// never contend. Clones share the same registry.
#[derive(Debug, Default, Clone)]
pub struct ProjectLocks {
    inner: Arc<Mutex<HashMap<ProjectId, Arc<Mutex<()>>>>>,
}

impl ProjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, id: ProjectId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(id).or_default())
    }

    /// Run `f` while holding the lock for `id`.
    pub fn with_lock<T>(&self, id: ProjectId, f: impl FnOnce() -> T) -> T {
        let handle = self.handle(id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Drop the entry for a destroyed project.
    ///
    /// The entry stays while any caller still holds or waits on the mutex,
    /// so later callers keep queueing behind it.
    pub fn forget(&self, id: ProjectId) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if map.get(&id).is_some_and(|handle| Arc::strong_count(handle) == 1) {
            map.remove(&id);
        }
    }

    /// Number of projects with a registered lock.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
