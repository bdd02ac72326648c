use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ordering::{next_order, reorder_by_keys, Ordered};
use super::rich_text::{RichText, RichTextFormat};
use crate::errors::{PageKitError, Result};

pub const ITEMS_COLLECTION: &str = "accordion items";

/// Accordion: ordered, collapsible sections
///
/// Always holds at least one item once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionPayload {
    pub items: Vec<AccordionItem>,
    #[serde(default)]
    pub allow_multiple_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionItem {
    pub id: String,
    pub header: String,
    pub content: RichText,
    #[serde(default)]
    pub is_open: bool,
    pub order: u32,
}

impl AccordionItem {
    pub fn new(header: impl Into<String>, content: RichText, order: u32) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            header: header.into(),
            content,
            is_open: false,
            order,
        }
    }
}

impl Ordered for AccordionItem {
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

/// Field-level update for one accordion item; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionItemPatch {
    pub header: Option<String>,
    pub content_format: Option<RichTextFormat>,
    pub content_data: Option<String>,
    pub is_open: Option<bool>,
    pub order: Option<u32>,
}

impl AccordionPayload {
    pub fn item(&self, item_id: &str) -> Option<&AccordionItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Append an item; order 0 means "after the last one"
    pub(crate) fn add_item(
        &mut self,
        component_id: &str,
        mut item: AccordionItem,
    ) -> Result<()> {
        if self.item(&item.id).is_some() {
            return Err(PageKitError::DuplicateItemId {
                component_id: component_id.to_string(),
                item_id: item.id,
            });
        }
        if item.order == 0 {
            item.order = next_order(component_id, &self.items)?;
        }
        if item.is_open && !self.allow_multiple_open {
            self.close_all();
        }
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn update_item(
        &mut self,
        component_id: &str,
        item_id: &str,
        patch: AccordionItemPatch,
    ) -> Result<()> {
        let exclusive = !self.allow_multiple_open && patch.is_open == Some(true);
        if exclusive {
            self.close_all();
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PageKitError::AccordionItemNotFound {
                component_id: component_id.to_string(),
                item_id: item_id.to_string(),
            })?;

        if let Some(header) = patch.header {
            item.header = header;
        }
        if patch.content_format.is_some() || patch.content_data.is_some() {
            let format = patch.content_format.unwrap_or(item.content.format);
            let data = patch
                .content_data
                .unwrap_or_else(|| item.content.data.clone());
            item.content.write(format, data);
        }
        if let Some(is_open) = patch.is_open {
            item.is_open = is_open;
        }
        if let Some(order) = patch.order {
            item.order = order;
        }
        Ok(())
    }

    /// Remove an item, refusing to empty the accordion
    pub(crate) fn remove_item(
        &mut self,
        component_id: &str,
        item_id: &str,
    ) -> Result<AccordionItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| PageKitError::AccordionItemNotFound {
                component_id: component_id.to_string(),
                item_id: item_id.to_string(),
            })?;
        if self.items.len() == 1 {
            return Err(PageKitError::MinimumCardinalityViolation {
                component_id: component_id.to_string(),
                collection: ITEMS_COLLECTION.to_string(),
            });
        }
        Ok(self.items.remove(pos))
    }

    pub(crate) fn reorder_items(
        &mut self,
        component_id: &str,
        ordered_ids: &[String],
    ) -> Result<()> {
        reorder_by_keys(&mut self.items, ordered_ids).map_err(|unknown| {
            PageKitError::AccordionItemNotFound {
                component_id: component_id.to_string(),
                item_id: unknown.join(", "),
            }
        })
    }

    fn close_all(&mut self) {
        for item in &mut self.items {
            item.is_open = false;
        }
    }
}

impl Default for AccordionPayload {
    fn default() -> Self {
        Self {
            items: vec![AccordionItem::new(
                "Section 1",
                RichText::html("<p>Section content</p>"),
                1,
            )],
            allow_multiple_open: false,
        }
    }
}
