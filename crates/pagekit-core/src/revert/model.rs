use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::{ComparisonMode, ComponentDiff};
use crate::model::{Page, PageVersion};

/// Knobs for one revert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertOptions {
    pub create_backup: bool,
    /// Recorded as author of the backup version
    pub author_id: String,
    pub comparison: ComparisonMode,
}

impl Default for RevertOptions {
    fn default() -> Self {
        Self {
            create_backup: true,
            author_id: "system".to_string(),
            comparison: ComparisonMode::default(),
        }
    }
}

/// Everything a revert will write, computed up front
#[derive(Debug, Clone, PartialEq)]
pub struct RevertPlan {
    pub target: PageVersion,
    /// New version preserving the pre-revert state, if one is needed
    pub backup: Option<PageVersion>,
    /// The page as it will be after the revert
    pub page: Page,
    pub diff: ComponentDiff,
}

impl RevertPlan {
    pub fn result(&self) -> RevertResult {
        RevertResult {
            reverted_to: VersionRef::from(&self.target),
            backup: self.backup.as_ref().map(VersionRef::from),
            page: PageSummary::from(&self.page),
            diff: self.diff.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRef {
    pub id: String,
    pub version_number: u32,
    pub timestamp: DateTime<Utc>,
}

impl From<&PageVersion> for VersionRef {
    fn from(version: &PageVersion) -> Self {
        Self {
            id: version.id().to_string(),
            version_number: version.version_number(),
            timestamp: version.timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub id: String,
    pub component_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            component_count: page.component_count(),
            updated_at: page.updated_at,
        }
    }
}

/// What the caller gets back from a revert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevertResult {
    pub reverted_to: VersionRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<VersionRef>,
    pub page: PageSummary,
    pub diff: ComponentDiff,
}
