use pagekit_core::ops::component_ops;
use pagekit_core::snapshot::{create_snapshot, SnapshotRequest};
use pagekit_core::{ComponentKind, Page, PageVersion};
use pagekit_store::{InMemoryRepository, PageRepository, SqliteRepository};
use tempfile::TempDir;

/// Page with a text (order 1), an accordion (order 2) and a link group (order 3)
#[allow(dead_code)]
pub fn sample_page() -> Page {
    let mut page = Page::new("tpl-landing");
    for (order, kind) in [
        (1, ComponentKind::Text),
        (2, ComponentKind::Accordion),
        (3, ComponentKind::LinkGroup),
    ] {
        component_ops::add_new_component(&mut page, kind, Some(order), None)
            .expect("default component");
    }
    page
}

/// Snapshot `page` as the next version in `repo`
#[allow(dead_code)]
pub fn snapshot(repo: &dyn PageRepository, page: &Page, author: &str) -> PageVersion {
    let existing = repo.get_versions_for_page(&page.id).expect("versions");
    let version = create_snapshot(page, &existing, SnapshotRequest::by(author));
    repo.save_version(&version).expect("save version")
}

/// File-backed SQLite repository in a fresh temp dir
///
/// The TempDir must outlive the repository.
#[allow(dead_code)]
pub fn sqlite_repo() -> (TempDir, SqliteRepository) {
    let dir = TempDir::new().expect("temp dir");
    let repo = SqliteRepository::open(dir.path().join("store.db")).expect("open sqlite");
    (dir, repo)
}

/// Both implementations, for contract tests
#[allow(dead_code)]
pub fn all_repos() -> (TempDir, Vec<(&'static str, Box<dyn PageRepository>)>) {
    let (dir, sqlite) = sqlite_repo();
    let repos: Vec<(&'static str, Box<dyn PageRepository>)> = vec![
        ("memory", Box::new(InMemoryRepository::new())),
        ("sqlite", Box::new(sqlite)),
    ];
    (dir, repos)
}
