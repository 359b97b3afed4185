//! Path-scoped locks
//!
//! Two sessions resolving to the same project root must never interleave
//! writes. The second one fails fast instead of waiting. Paths are keyed
//! after [`absolute_lexical`] normalization.

use crate::layout::absolute_lexical;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Process-wide map of project root to lock
///
/// Entries live as long as the map.
#[derive(Debug, Default)]
pub struct PathLocks {
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

/// Held lock on a project root; released on drop
#[derive(Debug)]
pub struct PathLockGuard {
    path: PathBuf,
    _guard: OwnedMutexGuard<()>,
}

impl PathLockGuard {
    /// Locked path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PathLocks {
    /// Create empty lock map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to lock `path` without waiting
    ///
    /// Returns `None` if another holder has it.
    #[must_use]
    pub fn try_acquire(&self, path: &Path) -> Option<PathLockGuard> {
        let key = absolute_lexical(path);
        let lock = Arc::clone(
            self.locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );

        let guard = lock.try_lock_owned().ok()?;
        tracing::trace!(path = %key.display(), "path lock acquired");
        Some(PathLockGuard {
            path: key,
            _guard: guard,
        })
    }

    /// Check whether `path` is currently locked
    #[must_use]
    pub fn is_locked(&self, path: &Path) -> bool {
        self.locks
            .get(&absolute_lexical(path))
            .is_some_and(|lock| lock.try_lock().is_err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let locks = PathLocks::new();
        let path = Path::new("/out/Vault");

        let guard = locks.try_acquire(path).unwrap();
        assert_eq!(guard.path(), path);
        assert!(locks.is_locked(path));
        assert!(locks.try_acquire(path).is_none());

        drop(guard);
        assert!(!locks.is_locked(path));
        assert!(locks.try_acquire(path).is_some());
    }

    #[test]
    fn distinct_paths_do_not_contend() {
        let locks = PathLocks::new();
        let _a = locks.try_acquire(Path::new("/out/A")).unwrap();
        let _b = locks.try_acquire(Path::new("/out/B")).unwrap();
    }

    #[test]
    fn spellings_of_one_path_share_a_lock() {
        let locks = PathLocks::new();
        let guard = locks.try_acquire(Path::new("/out/Vault")).unwrap();

        assert!(locks.try_acquire(Path::new("/out/sub/../Vault")).is_none());
        assert!(locks.is_locked(Path::new("/out/./Vault")));
        drop(guard);
        assert!(locks.try_acquire(Path::new("/out/sub/../Vault")).is_some());
    }
}
