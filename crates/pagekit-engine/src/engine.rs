//! The page engine
//!
//! `PageEngine` ties a repository to the per-page lock registry. The
//! caller-facing operations live in `commands::*` as further `impl` blocks;
//! this module holds the shared plumbing they run through.
//!
//! ## Logging Ownership
//!
//! The engine owns lifecycle logging for every caller-facing operation:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

use crate::config::EngineConfig;
use crate::locks::PageLocks;
use pagekit_core::errors::{PageKitError, PkError};
use pagekit_core::{apply, log_op_end, log_op_error, log_op_start, Command, Page};
use pagekit_store::{PageRepository, Result};
use std::time::Instant;

pub struct PageEngine<R: PageRepository> {
    repo: R,
    locks: PageLocks,
    config: EngineConfig,
}

impl<R: PageRepository> PageEngine<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, EngineConfig::default())
    }

    pub fn with_config(repo: R, config: EngineConfig) -> Self {
        Self {
            repo,
            locks: PageLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Load a page or fail with `NotFound`
    pub(crate) fn load_page(&self, page_id: &str) -> Result<Page> {
        self.repo.get_page_by_id(page_id)?.ok_or_else(|| {
            PageKitError::PageNotFound {
                page_id: page_id.to_string(),
            }
            .into()
        })
    }

    /// Load, change and save a page under its lock
    ///
    /// `f` gets the stored page by value and returns the page to save plus
    /// a value for the caller. Nothing is saved if `f` fails.
    pub(crate) fn mutate<T>(
        &self,
        page_id: &str,
        f: impl FnOnce(Page) -> Result<(Page, T)>,
    ) -> Result<(Page, T)> {
        self.locks.with_page(page_id, || {
            let page = self.load_page(page_id)?;
            let (page, out) = f(page)?;
            let saved = self.repo.save_page(&page)?;
            Ok((saved, out))
        })
    }

    /// Run any page command through the core `apply()` boundary
    ///
    /// # Errors
    /// * `NotFound` - If the page does not exist
    /// * Any domain error of the command itself, see `PageKitError`
    /// * `Persistence` - If the store fails
    pub fn execute(&self, page_id: &str, cmd: Command) -> Result<Page> {
        let op = cmd.op_name();
        self.observed(op, page_id, || {
            let (page, ()) = self.mutate(page_id, |page| Ok((apply(page, cmd)?, ())))?;
            Ok(page)
        })
    }

    pub(crate) fn locks(&self) -> &PageLocks {
        &self.locks
    }

    /// Wrap `f` in start/end/end_error lifecycle events for `op`
    ///
    /// Errors leave with the op and page id filled in if the failing layer
    /// did not set them.
    pub(crate) fn observed<T>(
        &self,
        op: &'static str,
        page_id: &str,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        log_op_start!(op, page_id = page_id);
        let start = Instant::now();

        match f() {
            Ok(out) => {
                log_op_end!(
                    op,
                    duration_ms = start.elapsed().as_millis() as u64,
                    page_id = page_id
                );
                Ok(out)
            }
            Err(e) => {
                let e = with_context(e, op, page_id);
                log_op_error!(
                    op,
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    page_id = page_id
                );
                Err(e)
            }
        }
    }
}

pub(crate) fn with_context(err: PkError, op: &str, page_id: &str) -> PkError {
    let err = if err.op().is_none() {
        err.with_op(op.to_string())
    } else {
        err
    };
    if err.page_id().is_none() && !page_id.is_empty() {
        err.with_page_id(page_id)
    } else {
        err
    }
}
