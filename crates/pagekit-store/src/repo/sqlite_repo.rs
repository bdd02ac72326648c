//! SQLite repository implementation
//!
//! Pages are upserted with their components as one JSON column; versions
//! are insert-only. A single connection is shared behind a mutex, so each
//! trait call runs alone on it.

use crate::db;
use crate::errors::{from_rusqlite, is_unique_violation, Result};
use crate::migrations::apply_migrations;
use crate::repo::hydration::{
    encode_components, encode_timestamp, PageRow, VersionRow, PAGE_COLUMNS, VERSION_COLUMNS,
};
use crate::repo::memory::version_number_taken;
use crate::repo::PageRepository;
use pagekit_core::errors::{PkError, PkErrorKind};
use pagekit_core::rules::invariants::ensure_page_valid;
use pagekit_core::{Page, PageVersion};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Open (or create) a database file and bring its schema up to date
    ///
    /// # Errors
    /// Returns a `Persistence` error if the file cannot be opened or a
    /// migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn)
    }

    /// Fresh in-memory database with the schema applied
    ///
    /// # Errors
    /// Returns a `Persistence` error if a migration fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            PkError::new(PkErrorKind::Internal)
                .with_op("sqlite_repo")
                .with_message("connection lock poisoned")
        })
    }
}

impl PageRepository for SqliteRepository {
    fn get_page_by_id(&self, page_id: &str) -> Result<Option<Page>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM pages WHERE id = ?1", PAGE_COLUMNS),
                [page_id],
                PageRow::read,
            )
            .optional()
            .map_err(from_rusqlite)?;
        row.map(PageRow::into_page).transpose()
    }

    fn save_page(&self, page: &Page) -> Result<Page> {
        ensure_page_valid(page)?;
        let components_json = encode_components("save_page", &page.id, page.components())?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO pages (id, template_id, components_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                template_id = excluded.template_id,
                components_json = excluded.components_json,
                updated_at = excluded.updated_at",
            rusqlite::params![
                page.id,
                page.template_id,
                components_json,
                encode_timestamp(&page.created_at),
                encode_timestamp(&page.updated_at),
            ],
        )
        .map_err(from_rusqlite)?;

        tracing::debug!(page_id = %page.id, components = page.component_count(), "page saved");
        Ok(page.clone())
    }

    fn get_versions_for_page(&self, page_id: &str) -> Result<Vec<PageVersion>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM page_versions WHERE page_id = ?1 ORDER BY version_number DESC",
                VERSION_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([page_id], VersionRow::read)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        rows.into_iter().map(VersionRow::into_version).collect()
    }

    fn save_version(&self, version: &PageVersion) -> Result<PageVersion> {
        let components_json =
            encode_components("save_version", version.id(), version.components())?;
        let conn = self.conn()?;

        let page_exists = conn
            .query_row(
                "SELECT 1 FROM pages WHERE id = ?1",
                [version.page_id()],
                |_| Ok(()),
            )
            .optional()
            .map_err(from_rusqlite)?
            .is_some();
        if !page_exists {
            return Err(PkError::new(PkErrorKind::NotFound)
                .with_op("save_version")
                .with_page_id(version.page_id())
                .with_message(format!("Page not found: {}", version.page_id())));
        }

        let number_taken = conn
            .query_row(
                "SELECT 1 FROM page_versions WHERE page_id = ?1 AND version_number = ?2",
                rusqlite::params![version.page_id(), version.version_number()],
                |_| Ok(()),
            )
            .optional()
            .map_err(from_rusqlite)?
            .is_some();
        if number_taken {
            return Err(version_number_taken(version));
        }

        conn.execute(
            "INSERT INTO page_versions (id, page_id, version_number, timestamp, author_id,
                version_name, change_description, components_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                version.id(),
                version.page_id(),
                version.version_number(),
                encode_timestamp(&version.timestamp()),
                version.author_id(),
                version.version_name(),
                version.change_description(),
                components_json,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                PkError::new(PkErrorKind::DuplicateKey)
                    .with_op("save_version")
                    .with_version_id(version.id())
                    .with_message(format!("Version already exists: {}", version.id()))
            } else {
                from_rusqlite(e)
            }
        })?;

        tracing::debug!(
            page_id = %version.page_id(),
            version_number = version.version_number(),
            "version saved"
        );
        Ok(version.clone())
    }

    fn delete_version(&self, page_id: &str, version_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn
            .execute(
                "DELETE FROM page_versions WHERE id = ?1 AND page_id = ?2",
                [version_id, page_id],
            )
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_applies_schema() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let conn = repo.conn().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('pages', 'page_versions')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_missing_page_loads_as_none() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(repo.get_page_by_id("nope").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_components_json_is_serialization_error() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.conn()
            .unwrap()
            .execute(
                "INSERT INTO pages (id, template_id, components_json, created_at, updated_at)
                 VALUES ('p1', 't1', 'not json', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let err = repo.get_page_by_id("p1").unwrap_err();
        assert_eq!(err.kind(), PkErrorKind::Serialization);
        assert_eq!(err.entity_id(), Some("p1"));
    }
}
