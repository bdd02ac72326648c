//! Revert surface
//!
//! The core plans the revert; this module commits it. The backup version is
//! written first and the page second. If the page write fails the backup
//! is deleted again, so a failed revert leaves no orphaned history.

use crate::engine::{with_context, PageEngine};
use pagekit_core::revert::{plan_revert, RevertOptions, RevertResult};
use pagekit_core::{log_op_end, log_op_error, log_op_start};
use pagekit_store::{PageRepository, Result};

impl<R: PageRepository> PageEngine<R> {
    /// Put a page back on the components of one of its versions
    ///
    /// `create_backup` falls back to `EngineConfig::backup_by_default`. A
    /// backup is only written when the page differs from the target under
    /// the configured comparison mode.
    ///
    /// # Errors
    /// * `NotFound` - If the page or version (scoped to the page) is absent
    /// * `Concurrency` - If the backup's number was taken in the store
    /// * `Persistence` - If the store fails; any backup written is rolled back
    pub fn revert(
        &self,
        page_id: &str,
        version_id: &str,
        create_backup: Option<bool>,
        author_id: &str,
    ) -> Result<RevertResult> {
        log_op_start!("revert", page_id = page_id, version_id = version_id);
        let start = std::time::Instant::now();

        let options = RevertOptions {
            create_backup: create_backup.unwrap_or(self.config().backup_by_default),
            author_id: author_id.to_string(),
            comparison: self.config().comparison,
        };

        let result = self
            .locks()
            .with_page(page_id, || self.revert_locked(page_id, version_id, &options))
            .map_err(|e| {
                let e = with_context(e, "revert", page_id);
                log_op_error!(
                    "revert",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    page_id = page_id,
                    version_id = version_id
                );
                e
            })?;

        log_op_end!(
            "revert",
            duration_ms = start.elapsed().as_millis() as u64,
            page_id = page_id,
            version_number = result.reverted_to.version_number,
            backup_created = result.backup.is_some()
        );

        Ok(result)
    }

    fn revert_locked(
        &self,
        page_id: &str,
        version_id: &str,
        options: &RevertOptions,
    ) -> Result<RevertResult> {
        let repo = self.repository();
        let page = self.load_page(page_id)?;
        let versions = repo.get_versions_for_page(page_id)?;
        let plan = plan_revert(&page, &versions, version_id, options)?;

        if let Some(backup) = &plan.backup {
            repo.save_version(backup)?;
        }

        if let Err(save_err) = repo.save_page(&plan.page) {
            if let Some(backup) = &plan.backup {
                match repo.delete_version(page_id, backup.id()) {
                    Ok(_) => tracing::debug!(
                        page_id,
                        backup_id = backup.id(),
                        "backup rolled back after failed revert"
                    ),
                    Err(rollback_err) => tracing::error!(
                        page_id,
                        backup_id = backup.id(),
                        error = %rollback_err,
                        "backup rollback failed"
                    ),
                }
            }
            return Err(save_err);
        }

        Ok(plan.result())
    }
}
