use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::component::Component;

/// Immutable, numbered snapshot of a page's components
///
/// Owns its own deep copy of the collection. There are no setters: a
/// version is created by `snapshot::create_snapshot` (or hydrated by a
/// store) and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    id: String,
    page_id: String,
    version_number: u32,
    timestamp: DateTime<Utc>,
    author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    change_description: Option<String>,
    components: Vec<Component>,
}

impl PageVersion {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: String,
        page_id: String,
        version_number: u32,
        timestamp: DateTime<Utc>,
        author_id: String,
        version_name: Option<String>,
        change_description: Option<String>,
        components: Vec<Component>,
    ) -> Self {
        Self {
            id,
            page_id,
            version_number,
            timestamp,
            author_id,
            version_name,
            change_description,
            components,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn version_number(&self) -> u32 {
        self.version_number
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn version_name(&self) -> Option<&str> {
        self.version_name.as_deref()
    }

    pub fn change_description(&self) -> Option<&str> {
        self.change_description.as_deref()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
