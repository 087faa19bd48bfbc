//! Per-parent serialization of regeneration.
//!
//! Two regenerations of the same child set must not interleave: the one that
//! commits second fully supersedes the first. A lock is keyed by the kind of
//! child set being replaced and the parent's ID, and is held from context
//! building through commit. Regenerations under different parents proceed
//! in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use craft_core::enums::EntityKind;
use tokio::sync::OwnedMutexGuard;

type Key = (EntityKind, String);

/// Registry of async locks, created on demand and pruned when idle.
#[derive(Debug, Default)]
pub struct ParentLocks {
    locks: Mutex<HashMap<Key, Arc<tokio::sync::Mutex<()>>>>,
}

/// Held lock on one child set. Released on drop.
#[derive(Debug)]
pub struct ParentGuard<'a> {
    registry: &'a ParentLocks,
    key: Key,
    guard: Option<OwnedMutexGuard<()>>,
}

impl ParentLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the `kind` children of `parent_id`.
    pub async fn acquire(&self, kind: EntityKind, parent_id: &str) -> ParentGuard<'_> {
        let key = (kind, parent_id.to_string());
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        let guard = lock.lock_owned().await;
        tracing::trace!(%kind, parent_id, "parent lock acquired");
        ParentGuard {
            registry: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for ParentGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self
            .registry
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the registry still references an idle lock.
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}
