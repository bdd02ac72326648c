//! Component surface keyed by page id and component id
//!
//! Every mutation is built as a core `Command` and runs through `apply()`
//! under the page lock, so a failed edit never reaches the store.

use crate::engine::PageEngine;
use pagekit_core::errors::PageKitError;
use pagekit_core::model::ordering::next_order;
use pagekit_core::model::{AccordionItem, AccordionItemPatch, Link, LinkPatch};
use pagekit_core::ops::component_ops::{build_component, get_ordered_components};
use pagekit_core::{apply, Command, Component, ComponentKind, ComponentPatch, Page};
use pagekit_store::{PageRepository, Result};
use serde_json::Value;

fn component_of(page: &Page, component_id: &str) -> Result<Component> {
    page.component(component_id).cloned().ok_or_else(|| {
        PageKitError::ComponentNotFound {
            page_id: page.id.clone(),
            component_id: component_id.to_string(),
        }
        .into()
    })
}

impl<R: PageRepository> PageEngine<R> {
    /// Add a default component of `kind`, optionally merge-patched
    ///
    /// Without an order the component goes after the last one.
    ///
    /// # Errors
    /// * `NotFound` - If the page does not exist
    /// * `DuplicateKey` - If the order is already taken
    /// * `ValidationFailed` - If the patched payload breaks a rule
    pub fn add_component(
        &self,
        page_id: &str,
        kind: ComponentKind,
        order: Option<u32>,
        payload: Option<Value>,
    ) -> Result<Component> {
        self.observed("component_add", page_id, || {
            let (_, component) = self.mutate(page_id, |page| {
                let order = match order {
                    Some(order) => order,
                    None => next_order(&page.id, page.components())?,
                };
                let component = build_component(kind, order, payload.as_ref())?;
                let page = apply(page, Command::ComponentAdd { component: component.clone() })?;
                Ok((page, component))
            })?;
            Ok(component)
        })
    }

    /// Merge `patch` into a component and return the stored result
    ///
    /// # Errors
    /// * `NotFound` - If the page or component does not exist
    /// * `KindImmutable` - If the patch names another kind
    /// * `DuplicateKey` - If the new order is held by another component
    /// * `ValidationFailed` - If the merged payload breaks a rule
    pub fn update_component(
        &self,
        page_id: &str,
        component_id: &str,
        patch: ComponentPatch,
    ) -> Result<Component> {
        let page = self.execute(
            page_id,
            Command::ComponentUpdate {
                component_id: component_id.to_string(),
                patch,
            },
        )?;
        component_of(&page, component_id)
    }

    /// Remove a component, returning it
    ///
    /// # Errors
    /// Returns `NotFound` if the page or component does not exist.
    pub fn remove_component(&self, page_id: &str, component_id: &str) -> Result<Component> {
        self.observed("component_remove", page_id, || {
            let (_, removed) = self.mutate(page_id, |page| {
                let removed = component_of(&page, component_id)?;
                let page = apply(
                    page,
                    Command::ComponentRemove {
                        component_id: component_id.to_string(),
                    },
                )?;
                Ok((page, removed))
            })?;
            Ok(removed)
        })
    }

    /// Reassign orders by listed ids; returns the components in new order
    ///
    /// # Errors
    /// Returns `NotFound` if the page or any listed id does not exist.
    pub fn reorder_components(&self, page_id: &str, ordered_ids: &[String]) -> Result<Vec<Component>> {
        let page = self.execute(
            page_id,
            Command::ComponentReorder {
                ordered_ids: ordered_ids.to_vec(),
            },
        )?;
        Ok(get_ordered_components(&page).into_iter().cloned().collect())
    }

    /// Components of a page sorted by order
    ///
    /// # Errors
    /// Returns `NotFound` if the page does not exist.
    pub fn list_components(&self, page_id: &str) -> Result<Vec<Component>> {
        self.observed("component_list", page_id, || {
            let page = self.load_page(page_id)?;
            Ok(get_ordered_components(&page).into_iter().cloned().collect())
        })
    }

    /// # Errors
    /// Returns `NotFound` if the page or component does not exist.
    pub fn get_component(&self, page_id: &str, component_id: &str) -> Result<Component> {
        self.observed("component_get", page_id, || {
            component_of(&self.load_page(page_id)?, component_id)
        })
    }

    /// Nested edits return the owning component as stored afterwards.
    ///
    /// # Errors
    /// * `NotFound` - If the page or component does not exist
    /// * `ValidationFailed` - If the component is not an accordion or the item breaks a rule
    /// * `DuplicateKey` - If the item id is already used
    pub fn add_accordion_item(
        &self,
        page_id: &str,
        component_id: &str,
        item: AccordionItem,
    ) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::AccordionItemAdd {
                component_id: component_id.to_string(),
                item,
            },
        )
    }

    /// # Errors
    /// * `NotFound` - If the page, component or item does not exist
    /// * `ValidationFailed` - If the patched item breaks a rule
    pub fn update_accordion_item(
        &self,
        page_id: &str,
        component_id: &str,
        item_id: &str,
        patch: AccordionItemPatch,
    ) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::AccordionItemUpdate {
                component_id: component_id.to_string(),
                item_id: item_id.to_string(),
                patch,
            },
        )
    }

    /// # Errors
    /// * `NotFound` - If the page, component or item does not exist
    /// * `MinimumCardinalityViolation` - If it is the accordion's last item
    pub fn remove_accordion_item(
        &self,
        page_id: &str,
        component_id: &str,
        item_id: &str,
    ) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::AccordionItemRemove {
                component_id: component_id.to_string(),
                item_id: item_id.to_string(),
            },
        )
    }

    /// # Errors
    /// Returns `NotFound` if the page, component or a listed item does not exist.
    pub fn reorder_accordion_items(
        &self,
        page_id: &str,
        component_id: &str,
        ordered_ids: &[String],
    ) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::AccordionItemReorder {
                component_id: component_id.to_string(),
                ordered_ids: ordered_ids.to_vec(),
            },
        )
    }

    /// # Errors
    /// * `NotFound` - If the page or component does not exist
    /// * `ValidationFailed` - If the component is not a link group or the link breaks a rule
    /// * `DuplicateKey` - If the link id is already used
    pub fn add_link(&self, page_id: &str, component_id: &str, link: Link) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::LinkAdd {
                component_id: component_id.to_string(),
                link,
            },
        )
    }

    /// # Errors
    /// * `NotFound` - If the page, component or link does not exist
    /// * `ValidationFailed` - If the patched link breaks a rule
    pub fn update_link(
        &self,
        page_id: &str,
        component_id: &str,
        link_id: &str,
        patch: LinkPatch,
    ) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::LinkUpdate {
                component_id: component_id.to_string(),
                link_id: link_id.to_string(),
                patch,
            },
        )
    }

    /// # Errors
    /// * `NotFound` - If the page, component or link does not exist
    /// * `MinimumCardinalityViolation` - If it is the group's last link
    pub fn remove_link(&self, page_id: &str, component_id: &str, link_id: &str) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::LinkRemove {
                component_id: component_id.to_string(),
                link_id: link_id.to_string(),
            },
        )
    }

    /// # Errors
    /// Returns `NotFound` if the page, component or a listed link does not exist.
    pub fn reorder_links(
        &self,
        page_id: &str,
        component_id: &str,
        ordered_ids: &[String],
    ) -> Result<Component> {
        self.nested(
            page_id,
            component_id,
            Command::LinkReorder {
                component_id: component_id.to_string(),
                ordered_ids: ordered_ids.to_vec(),
            },
        )
    }

    fn nested(&self, page_id: &str, component_id: &str, cmd: Command) -> Result<Component> {
        let page = self.execute(page_id, cmd)?;
        component_of(&page, component_id)
    }
}
