use chrono::Utc;
use uuid::Uuid;

use crate::errors::{PageKitError, Result};
use crate::model::{Page, PageVersion};

/// Caller-supplied labels for a new version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub author_id: String,
    pub version_name: Option<String>,
    pub change_description: Option<String>,
}

impl SnapshotRequest {
    pub fn by(author_id: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.version_name = Some(name.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.change_description = Some(description.into());
        self
    }
}

/// One past the highest version number of `page_id`, or 1 if it has none
///
/// Versions of other pages in `existing` are ignored.
pub fn next_version_number(page_id: &str, existing: &[PageVersion]) -> u32 {
    existing
        .iter()
        .filter(|v| v.page_id() == page_id)
        .map(PageVersion::version_number)
        .max()
        .map_or(1, |max| max + 1)
}

/// Snapshot the page's current components as a new version
///
/// The components are deep-copied; later edits to the page never reach
/// the version. `existing` must hold every version already stored for the
/// page, read under the same lock that will save the result.
pub fn create_snapshot(
    page: &Page,
    existing: &[PageVersion],
    request: SnapshotRequest,
) -> PageVersion {
    let version_number = next_version_number(&page.id, existing);
    tracing::debug!(
        page_id = %page.id,
        version_number,
        component_count = page.component_count(),
        "snapshot created"
    );
    PageVersion::restore(
        Uuid::now_v7().to_string(),
        page.id.clone(),
        version_number,
        Utc::now(),
        request.author_id,
        request.version_name,
        request.change_description,
        page.components().to_vec(),
    )
}

/// Versions of `page_id`, highest version number first
pub fn list_versions<'a>(page_id: &str, versions: &'a [PageVersion]) -> Vec<&'a PageVersion> {
    let mut out: Vec<&PageVersion> = versions.iter().filter(|v| v.page_id() == page_id).collect();
    out.sort_by(|a, b| b.version_number().cmp(&a.version_number()));
    out
}

/// Look up a version scoped to its page
///
/// # Errors
/// * `VersionNotFound` - If no version has that id, or it belongs to another page
pub fn find_version<'a>(
    page_id: &str,
    version_id: &str,
    versions: &'a [PageVersion],
) -> Result<&'a PageVersion> {
    versions
        .iter()
        .find(|v| v.id() == version_id && v.page_id() == page_id)
        .ok_or_else(|| PageKitError::VersionNotFound {
            page_id: page_id.to_string(),
            version_id: version_id.to_string(),
        })
}
