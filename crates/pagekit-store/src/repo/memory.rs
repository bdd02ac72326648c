//! In-memory repository
//!
//! Pages and versions live in hash maps behind a single `RwLock`. Used by
//! tests and by callers that embed the engine without a database.

use crate::errors::Result;
use crate::repo::PageRepository;
use pagekit_core::errors::{PkError, PkErrorKind};
use pagekit_core::rules::invariants::ensure_page_valid;
use pagekit_core::{Page, PageVersion};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct Tables {
    pages: HashMap<String, Page>,
    /// page id -> versions in insertion order
    versions: HashMap<String, Vec<PageVersion>>,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> PkError {
    PkError::new(PkErrorKind::Internal)
        .with_op("memory_repo")
        .with_message("repository lock poisoned")
}

impl PageRepository for InMemoryRepository {
    fn get_page_by_id(&self, page_id: &str) -> Result<Option<Page>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.pages.get(page_id).cloned())
    }

    fn save_page(&self, page: &Page) -> Result<Page> {
        ensure_page_valid(page)?;
        let mut tables = self.tables.write().map_err(poisoned)?;
        tables.pages.insert(page.id.clone(), page.clone());
        Ok(page.clone())
    }

    fn get_versions_for_page(&self, page_id: &str) -> Result<Vec<PageVersion>> {
        let tables = self.tables.read().map_err(poisoned)?;
        let mut versions = tables.versions.get(page_id).cloned().unwrap_or_default();
        versions.sort_by(|a, b| b.version_number().cmp(&a.version_number()));
        Ok(versions)
    }

    fn save_version(&self, version: &PageVersion) -> Result<PageVersion> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if !tables.pages.contains_key(version.page_id()) {
            return Err(PkError::new(PkErrorKind::NotFound)
                .with_op("save_version")
                .with_page_id(version.page_id())
                .with_message(format!("Page not found: {}", version.page_id())));
        }
        if tables
            .versions
            .values()
            .flatten()
            .any(|v| v.id() == version.id())
        {
            return Err(PkError::new(PkErrorKind::DuplicateKey)
                .with_op("save_version")
                .with_version_id(version.id())
                .with_message(format!("Version already exists: {}", version.id())));
        }
        let existing = tables
            .versions
            .entry(version.page_id().to_string())
            .or_default();
        if existing
            .iter()
            .any(|v| v.version_number() == version.version_number())
        {
            return Err(version_number_taken(version));
        }
        existing.push(version.clone());
        Ok(version.clone())
    }

    fn delete_version(&self, page_id: &str, version_id: &str) -> Result<bool> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(versions) = tables.versions.get_mut(page_id) else {
            return Ok(false);
        };
        let before = versions.len();
        versions.retain(|v| v.id() != version_id);
        Ok(versions.len() != before)
    }
}

/// The per-page number is already held by another version
pub(crate) fn version_number_taken(version: &PageVersion) -> PkError {
    PkError::new(PkErrorKind::Concurrency)
        .with_op("save_version")
        .with_page_id(version.page_id())
        .with_version_id(version.id())
        .with_message(format!(
            "Version number {} already exists for page {}",
            version.version_number(),
            version.page_id()
        ))
}
