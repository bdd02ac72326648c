//! Repository layer
//!
//! `PageRepository` is the persistence seam the engine is written against.
//! Both implementations share the same contract:
//!
//! - `save_page` upserts and refuses pages that break component invariants
//! - `save_version` refuses a second version with the same number for a page
//! - versions come back highest number first

mod hydration;
mod memory;
mod sqlite_repo;

pub use memory::InMemoryRepository;
pub use sqlite_repo::SqliteRepository;

use crate::errors::Result;
use pagekit_core::{Page, PageVersion};

/// Persistence contract for pages and their versions
///
/// Implementations are shared across threads by the engine; each call is
/// individually atomic. Cross-call atomicity (read versions, then save one)
/// is the engine's per-page lock.
pub trait PageRepository: Send + Sync {
    /// Load a page, or `None` if it was never saved
    ///
    /// # Errors
    /// Returns `Persistence` or `Serialization` errors from the backing store.
    fn get_page_by_id(&self, page_id: &str) -> Result<Option<Page>>;

    /// Insert or replace a page, returning what was stored
    ///
    /// # Errors
    /// Returns `ValidationFailed` if the page's components break an
    /// invariant, or a `Persistence` error from the backing store.
    fn save_page(&self, page: &Page) -> Result<Page>;

    /// All versions of a page, highest version number first
    ///
    /// # Errors
    /// Returns `Persistence` or `Serialization` errors from the backing store.
    fn get_versions_for_page(&self, page_id: &str) -> Result<Vec<PageVersion>>;

    /// Store a new version
    ///
    /// # Errors
    /// * `NotFound` - The owning page was never saved
    /// * `Concurrency` - The page already has a version with this number
    /// * `DuplicateKey` - A version with this id already exists
    fn save_version(&self, version: &PageVersion) -> Result<PageVersion>;

    /// Delete a version, returning whether it existed
    ///
    /// Only used to roll back a backup written by a failed revert.
    ///
    /// # Errors
    /// Returns a `Persistence` error from the backing store.
    fn delete_version(&self, page_id: &str, version_id: &str) -> Result<bool>;
}
