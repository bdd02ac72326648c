//! Per-page lock registry
//!
//! One mutex per page id, created on first use and dropped again once no
//! caller holds or waits on it. Work on the same page runs one closure at a
//! time; different pages never contend beyond the brief registry lookup.

use pagekit_core::errors::{PkError, PkErrorKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct PageLocks {
    registry: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PageLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `page_id`
    ///
    /// # Errors
    /// Returns `Internal` if the registry itself is poisoned, otherwise
    /// whatever `f` returns.
    pub fn with_page<T>(
        &self,
        page_id: &str,
        f: impl FnOnce() -> Result<T, PkError>,
    ) -> Result<T, PkError> {
        let lock = self.lock_for(page_id)?;
        let result = {
            // The guarded value is (), so a panic elsewhere cannot leave it torn.
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(page_id, lock);
        result
    }

    /// Number of pages currently locked or waited on
    pub fn len(&self) -> usize {
        self.registry.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_for(&self, page_id: &str) -> Result<Arc<Mutex<()>>, PkError> {
        let mut registry = self.registry.lock().map_err(|_| {
            PkError::new(PkErrorKind::Internal)
                .with_op("page_lock")
                .with_page_id(page_id)
                .with_message("page lock registry poisoned")
        })?;
        Ok(Arc::clone(registry.entry(page_id.to_string()).or_default()))
    }

    /// Drop the registry entry when `lock` is its last outside handle
    ///
    /// Handles are only cloned under the registry mutex, so a count of two
    /// (registry plus ours) seen under it cannot grow behind our back.
    fn release(&self, page_id: &str, lock: Arc<Mutex<()>>) {
        let Ok(mut registry) = self.registry.lock() else {
            return;
        };
        if Arc::strong_count(&lock) == 2 {
            registry.remove(page_id);
        }
    }
}
