use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ordering::{next_order, reorder_by_keys, Ordered};
use super::shared::LinkTarget;
use crate::errors::{PageKitError, Result};

pub const LINKS_COLLECTION: &str = "group links";

/// Ordered list of outbound links; never empty once validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkGroupPayload {
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub link_text: String,
    pub link_url: String,
    #[serde(default)]
    pub link_target: LinkTarget,
    pub order: u32,
}

impl Link {
    pub fn new(link_text: impl Into<String>, link_url: impl Into<String>, order: u32) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            link_text: link_text.into(),
            link_url: link_url.into(),
            link_target: LinkTarget::default(),
            order,
        }
    }

    pub fn with_target(mut self, target: LinkTarget) -> Self {
        self.link_target = target;
        self
    }
}

impl Ordered for Link {
    fn key(&self) -> &str {
        &self.id
    }
    fn order(&self) -> u32 {
        self.order
    }
    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPatch {
    pub link_text: Option<String>,
    pub link_url: Option<String>,
    pub link_target: Option<LinkTarget>,
    pub order: Option<u32>,
}

impl LinkGroupPayload {
    pub fn link(&self, link_id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == link_id)
    }

    /// Append a link; order 0 means "after the last one"
    ///
    /// Text uniqueness is left to validation, which reports every clash.
    pub(crate) fn add_link(&mut self, component_id: &str, mut link: Link) -> Result<()> {
        if self.link(&link.id).is_some() {
            return Err(PageKitError::DuplicateItemId {
                component_id: component_id.to_string(),
                item_id: link.id,
            });
        }
        if link.order == 0 {
            link.order = next_order(component_id, &self.links)?;
        }
        self.links.push(link);
        Ok(())
    }

    pub(crate) fn update_link(
        &mut self,
        component_id: &str,
        link_id: &str,
        patch: LinkPatch,
    ) -> Result<()> {
        let link = self
            .links
            .iter_mut()
            .find(|l| l.id == link_id)
            .ok_or_else(|| PageKitError::LinkNotFound {
                component_id: component_id.to_string(),
                link_id: link_id.to_string(),
            })?;

        if let Some(text) = patch.link_text {
            link.link_text = text;
        }
        if let Some(url) = patch.link_url {
            link.link_url = url;
        }
        if let Some(target) = patch.link_target {
            link.link_target = target;
        }
        if let Some(order) = patch.order {
            link.order = order;
        }
        Ok(())
    }

    pub(crate) fn remove_link(&mut self, component_id: &str, link_id: &str) -> Result<Link> {
        let pos = self
            .links
            .iter()
            .position(|l| l.id == link_id)
            .ok_or_else(|| PageKitError::LinkNotFound {
                component_id: component_id.to_string(),
                link_id: link_id.to_string(),
            })?;
        if self.links.len() == 1 {
            return Err(PageKitError::MinimumCardinalityViolation {
                component_id: component_id.to_string(),
                collection: LINKS_COLLECTION.to_string(),
            });
        }
        Ok(self.links.remove(pos))
    }

    pub(crate) fn reorder_links(&mut self, component_id: &str, ordered_ids: &[String]) -> Result<()> {
        reorder_by_keys(&mut self.links, ordered_ids).map_err(|unknown| PageKitError::LinkNotFound {
            component_id: component_id.to_string(),
            link_id: unknown.join(", "),
        })
    }
}

impl Default for LinkGroupPayload {
    fn default() -> Self {
        Self {
            links: vec![Link::new("Home", "https://example.com/", 1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_last_link_is_rejected() {
        let mut group = LinkGroupPayload::default();
        let only = group.links[0].id.clone();
        let before = group.clone();

        let err = group.remove_link("c1", &only).unwrap_err();

        assert_eq!(
            err,
            PageKitError::MinimumCardinalityViolation {
                component_id: "c1".to_string(),
                collection: LINKS_COLLECTION.to_string(),
            }
        );
        assert_eq!(group, before);
    }

    #[test]
    fn test_reorder_links_unknown_id_leaves_group_untouched() {
        let mut group = LinkGroupPayload::default();
        group
            .add_link("c1", Link::new("Docs", "https://example.com/docs", 0))
            .unwrap();
        let before = group.clone();

        let err = group
            .reorder_links("c1", &["missing".to_string()])
            .unwrap_err();

        assert!(matches!(err, PageKitError::LinkNotFound { .. }));
        assert_eq!(group, before);
    }

    #[test]
    fn test_reorder_links_moves_listed_first() {
        let mut group = LinkGroupPayload::default();
        group
            .add_link("c1", Link::new("Docs", "https://example.com/docs", 0))
            .unwrap();
        let docs = group.links[1].id.clone();

        group.reorder_links("c1", &[docs.clone()]).unwrap();

        assert_eq!(group.links[0].id, docs);
        assert_eq!(group.links[0].order, 1);
        assert_eq!(group.links[1].order, 2);
    }

    #[test]
    fn test_link_wire_format() {
        let link = Link::new("Docs", "https://example.com/docs", 3).with_target(LinkTarget::NewTab);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["linkText"], "Docs");
        assert_eq!(json["linkUrl"], "https://example.com/docs");
        assert_eq!(json["linkTarget"], "_blank");
        assert_eq!(json["order"], 3);
    }
}
