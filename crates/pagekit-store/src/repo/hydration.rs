//! Hydration layer - rebuilds domain models from SQLite rows
//!
//! Columns are read raw first, then decoded outside the rusqlite closure so
//! that bad JSON or timestamps surface as `Serialization` errors naming the
//! row, not as opaque SQLite failures.

use crate::errors::{corrupt_row, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use pagekit_core::{Component, Page, PageVersion};
use rusqlite::Row;

pub(crate) const PAGE_COLUMNS: &str = "id, template_id, components_json, created_at, updated_at";

pub(crate) const VERSION_COLUMNS: &str = "id, page_id, version_number, timestamp, author_id, \
     version_name, change_description, components_json";

/// Undecoded `pages` row
pub(crate) struct PageRow {
    id: String,
    template_id: String,
    components_json: String,
    created_at: String,
    updated_at: String,
}

impl PageRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            template_id: row.get(1)?,
            components_json: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    pub(crate) fn into_page(self) -> Result<Page> {
        let components = decode_components("load_page", &self.id, &self.components_json)?;
        let created_at = decode_timestamp("load_page", &self.id, &self.created_at)?;
        let updated_at = decode_timestamp("load_page", &self.id, &self.updated_at)?;
        Ok(Page::restore(
            self.id,
            self.template_id,
            components,
            created_at,
            updated_at,
        ))
    }
}

/// Undecoded `page_versions` row
pub(crate) struct VersionRow {
    id: String,
    page_id: String,
    version_number: u32,
    timestamp: String,
    author_id: String,
    version_name: Option<String>,
    change_description: Option<String>,
    components_json: String,
}

impl VersionRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            page_id: row.get(1)?,
            version_number: row.get(2)?,
            timestamp: row.get(3)?,
            author_id: row.get(4)?,
            version_name: row.get(5)?,
            change_description: row.get(6)?,
            components_json: row.get(7)?,
        })
    }

    pub(crate) fn into_version(self) -> Result<PageVersion> {
        let components = decode_components("load_version", &self.id, &self.components_json)?;
        let timestamp = decode_timestamp("load_version", &self.id, &self.timestamp)?;
        Ok(PageVersion::restore(
            self.id,
            self.page_id,
            self.version_number,
            timestamp,
            self.author_id,
            self.version_name,
            self.change_description,
            components,
        ))
    }
}

/// Timestamps are stored as RFC 3339 with nanoseconds so they survive a
/// round trip exactly.
pub(crate) fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn encode_components(op: &str, id: &str, components: &[Component]) -> Result<String> {
    serde_json::to_string(components).map_err(|e| corrupt_row(op, id, e))
}

fn decode_components(op: &str, id: &str, json: &str) -> Result<Vec<Component>> {
    serde_json::from_str(json).map_err(|e| corrupt_row(op, id, e))
}

fn decode_timestamp(op: &str, id: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| corrupt_row(op, id, e))
}
