use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::component::Component;
use super::ordering::sorted_by_order;

/// Page - the aggregate that owns an ordered component collection
///
/// Components never exist outside a page. The collection is only changed
/// through `ops` (or `apply`), which re-check the id and order uniqueness
/// rules before committing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Template the page was created from
    pub template_id: String,

    /// Live components, in storage order (see `ordered_components`)
    components: Vec<Component>,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every structural or content mutation
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Create an empty page with a fresh id
    pub fn new(template_id: impl Into<String>) -> Self {
        Self::with_id(Uuid::now_v7().to_string(), template_id)
    }

    pub fn with_id(id: impl Into<String>, template_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            template_id: template_id.into(),
            components: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a page from stored parts without re-stamping timestamps
    ///
    /// No invariant checks run here; use `rules::invariants::audit_page`
    /// on hydrated data.
    pub fn restore(
        id: String,
        template_id: String,
        components: Vec<Component>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            template_id,
            components,
            created_at,
            updated_at,
        }
    }

    /// Components in storage order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Components sorted by `order`, stable for equal orders
    pub fn ordered_components(&self) -> Vec<&Component> {
        sorted_by_order(&self.components)
    }

    pub fn component(&self, component_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == component_id)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub(crate) fn components_mut(&mut self) -> &mut Vec<Component> {
        &mut self.components
    }

    pub(crate) fn replace_components(&mut self, components: Vec<Component>) {
        self.components = components;
        self.touch();
    }

    /// Refresh `updated_at`, never moving it backwards
    pub(crate) fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::component::{ComponentKind, ComponentPayload};

    #[test]
    fn test_new_page_is_empty() {
        let page = Page::new("tpl-landing");
        assert_eq!(page.template_id, "tpl-landing");
        assert_eq!(page.component_count(), 0);
        assert_eq!(page.created_at, page.updated_at);
    }

    #[test]
    fn test_ordered_components_sorts_by_order() {
        let page = Page::restore(
            "p1".to_string(),
            "t1".to_string(),
            vec![
                Component::new("b", 2, ComponentPayload::default_for(ComponentKind::Card)),
                Component::new("a", 1, ComponentPayload::default_for(ComponentKind::Text)),
            ],
            Utc::now(),
            Utc::now(),
        );

        let ids: Vec<&str> = page.ordered_components().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_page_wire_format_is_camel_case() {
        let page = Page::new("t1");
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("templateId").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json["components"].is_array());
    }
}
