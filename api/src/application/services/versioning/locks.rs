use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

/// Locks a mutex, recovering the guard if a previous holder panicked.
///
/// Every critical section in the versioning core either completes a single
/// `push`/`insert` or does nothing, so poisoned data is still consistent.
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One mutex per prompt, created on first use and kept for the life of the
/// process so two callers can never race on creating or dropping a handle.
#[derive(Default)]
pub struct PromptLocks {
    inner: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl PromptLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `prompt_id`. Not reentrant.
    pub fn with_lock<T>(&self, prompt_id: Uuid, f: impl FnOnce() -> T) -> T {
        let handle = {
            let mut locks = lock_unpoisoned(&self.inner);
            Arc::clone(locks.entry(prompt_id).or_default())
        };
        let _guard = lock_unpoisoned(&handle);
        f()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        lock_unpoisoned(&self.inner).len()
    }
}
