//! Version surface: snapshot, list, read
//!
//! Snapshots are taken under the page lock, so reading the existing
//! numbers and saving `max + 1` cannot interleave with another snapshot or
//! revert of the same page.

use crate::engine::{with_context, PageEngine};
use pagekit_core::snapshot::{create_snapshot, find_version, SnapshotRequest};
use pagekit_core::{log_op_end, log_op_error, log_op_start, PageVersion};
use pagekit_store::{PageRepository, Result};

impl<R: PageRepository> PageEngine<R> {
    /// Snapshot the page's current components as the next version
    ///
    /// # Errors
    /// * `NotFound` - If the page does not exist
    /// * `Concurrency` - If the store already holds the computed number
    /// * `Persistence` - If the store fails
    pub fn create_version(&self, page_id: &str, request: SnapshotRequest) -> Result<PageVersion> {
        log_op_start!("version_create", page_id = page_id, author_id = %request.author_id);
        let start = std::time::Instant::now();

        let result = self
            .locks()
            .with_page(page_id, || {
                let page = self.load_page(page_id)?;
                let existing = self.repository().get_versions_for_page(page_id)?;
                let version = create_snapshot(&page, &existing, request);
                self.repository().save_version(&version)
            })
            .map_err(|e| {
                let e = with_context(e, "version_create", page_id);
                log_op_error!(
                    "version_create",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    page_id = page_id
                );
                e
            })?;

        log_op_end!(
            "version_create",
            duration_ms = start.elapsed().as_millis() as u64,
            page_id = page_id,
            version_number = result.version_number()
        );

        Ok(result)
    }

    /// Versions of a page, highest number first
    ///
    /// # Errors
    /// Returns `NotFound` if the page does not exist.
    pub fn list_versions(&self, page_id: &str) -> Result<Vec<PageVersion>> {
        self.observed("version_list", page_id, || {
            self.load_page(page_id)?;
            self.repository().get_versions_for_page(page_id)
        })
    }

    /// A stored version, scoped to its page
    ///
    /// # Errors
    /// Returns `NotFound` if the page does not exist or the version does
    /// not belong to it.
    pub fn get_version_content(&self, page_id: &str, version_id: &str) -> Result<PageVersion> {
        self.observed("version_get", page_id, || {
            self.load_page(page_id)?;
            let versions = self.repository().get_versions_for_page(page_id)?;
            Ok(find_version(page_id, version_id, &versions)?.clone())
        })
    }
}
