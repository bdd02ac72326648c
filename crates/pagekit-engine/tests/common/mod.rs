use pagekit_core::errors::{PkError, PkErrorKind};
use pagekit_core::{ComponentKind, Page, PageVersion};
use pagekit_engine::PageEngine;
use pagekit_store::{InMemoryRepository, PageRepository, Result, SqliteRepository};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

/// Engine over a fresh in-memory repository
#[allow(dead_code)]
pub fn memory_engine() -> PageEngine<InMemoryRepository> {
    PageEngine::new(InMemoryRepository::new())
}

/// Engine over a SQLite file in a temp dir; keep the TempDir alive
#[allow(dead_code)]
pub fn sqlite_engine() -> (TempDir, PageEngine<SqliteRepository>) {
    let dir = TempDir::new().expect("temp dir");
    let repo = SqliteRepository::open(dir.path().join("store.db")).expect("open sqlite");
    (dir, PageEngine::new(repo))
}

/// Stored page with a text (order 1) and a card (order 2)
///
/// Returns (page_id, text_id, card_id)
#[allow(dead_code)]
pub fn text_and_card<R: PageRepository>(engine: &PageEngine<R>) -> (String, String, String) {
    let page = engine.create_page("tpl-test").expect("page");
    let text = engine
        .add_component(&page.id, ComponentKind::Text, Some(1), None)
        .expect("text");
    let card = engine
        .add_component(&page.id, ComponentKind::Card, Some(2), None)
        .expect("card");
    (page.id, text.id().to_string(), card.id().to_string())
}

/// In-memory repository whose page writes can be made to fail
#[allow(dead_code)]
#[derive(Default)]
pub struct FlakyRepository {
    inner: InMemoryRepository,
    fail_page_saves: AtomicBool,
}

#[allow(dead_code)]
impl FlakyRepository {
    pub fn fail_page_saves(&self, fail: bool) {
        self.fail_page_saves.store(fail, Ordering::SeqCst);
    }
}

impl PageRepository for FlakyRepository {
    fn get_page_by_id(&self, page_id: &str) -> Result<Option<Page>> {
        self.inner.get_page_by_id(page_id)
    }

    fn save_page(&self, page: &Page) -> Result<Page> {
        if self.fail_page_saves.load(Ordering::SeqCst) {
            return Err(PkError::new(PkErrorKind::Persistence)
                .with_op("save_page")
                .with_message("disk full"));
        }
        self.inner.save_page(page)
    }

    fn get_versions_for_page(&self, page_id: &str) -> Result<Vec<PageVersion>> {
        self.inner.get_versions_for_page(page_id)
    }

    fn save_version(&self, version: &PageVersion) -> Result<PageVersion> {
        self.inner.save_version(version)
    }

    fn delete_version(&self, page_id: &str, version_id: &str) -> Result<bool> {
        self.inner.delete_version(page_id, version_id)
    }
}
