//! Operations on the nested collections of accordion and link-group components
//!
//! Each operation works on a clone of the owning component, re-validates
//! it in full and only then swaps it into the page.

use crate::errors::{PageKitError, Result};
use crate::model::{
    AccordionItem, AccordionItemPatch, AccordionPayload, ComponentKind, ComponentPayload, Link,
    LinkGroupPayload, LinkPatch, Page,
};

fn kind_mismatch(component_id: &str, expected: ComponentKind, actual: ComponentKind) -> PageKitError {
    PageKitError::KindMismatch {
        component_id: component_id.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// Run `f` against a copy of the component's payload and commit if it stays valid
fn edit_component<T>(
    page: &mut Page,
    component_id: &str,
    f: impl FnOnce(&mut ComponentPayload) -> Result<T>,
) -> Result<T> {
    let index = page
        .components()
        .iter()
        .position(|c| c.id() == component_id)
        .ok_or_else(|| PageKitError::ComponentNotFound {
            page_id: page.id.clone(),
            component_id: component_id.to_string(),
        })?;

    let mut candidate = page.components()[index].clone();
    let out = f(candidate.payload_mut())?;
    candidate.ensure_valid()?;

    page.components_mut()[index] = candidate;
    page.touch();
    Ok(out)
}

fn edit_accordion<T>(
    page: &mut Page,
    component_id: &str,
    f: impl FnOnce(&mut AccordionPayload) -> Result<T>,
) -> Result<T> {
    edit_component(page, component_id, |payload| match payload {
        ComponentPayload::Accordion(acc) => f(acc),
        other => Err(kind_mismatch(
            component_id,
            ComponentKind::Accordion,
            other.kind(),
        )),
    })
}

fn edit_link_group<T>(
    page: &mut Page,
    component_id: &str,
    f: impl FnOnce(&mut LinkGroupPayload) -> Result<T>,
) -> Result<T> {
    edit_component(page, component_id, |payload| match payload {
        ComponentPayload::LinkGroup(group) => f(group),
        other => Err(kind_mismatch(
            component_id,
            ComponentKind::LinkGroup,
            other.kind(),
        )),
    })
}

/// Add an item to an accordion; order 0 appends after the last item
///
/// # Returns
/// The id of the added item
///
/// # Errors
/// * `ComponentNotFound` / `KindMismatch` - If the component is absent or not an accordion
/// * `DuplicateItemId` - If the item id is already used in this accordion
/// * `ValidationFailed` - If the resulting accordion is invalid
pub fn add_accordion_item(page: &mut Page, component_id: &str, item: AccordionItem) -> Result<String> {
    edit_accordion(page, component_id, |acc| {
        let id = item.id.clone();
        acc.add_item(component_id, item)?;
        Ok(id)
    })
}

/// # Errors
/// * `AccordionItemNotFound` - If the item is not in the accordion
/// * `ValidationFailed` - If the resulting accordion is invalid
pub fn update_accordion_item(
    page: &mut Page,
    component_id: &str,
    item_id: &str,
    patch: AccordionItemPatch,
) -> Result<()> {
    edit_accordion(page, component_id, |acc| {
        acc.update_item(component_id, item_id, patch)
    })
}

/// # Errors
/// * `AccordionItemNotFound` - If the item is not in the accordion
/// * `MinimumCardinalityViolation` - If it is the accordion's last item
pub fn remove_accordion_item(
    page: &mut Page,
    component_id: &str,
    item_id: &str,
) -> Result<AccordionItem> {
    edit_accordion(page, component_id, |acc| acc.remove_item(component_id, item_id))
}

/// # Errors
/// * `AccordionItemNotFound` - If a listed id is not in the accordion
pub fn reorder_accordion_items(
    page: &mut Page,
    component_id: &str,
    ordered_ids: &[String],
) -> Result<()> {
    edit_accordion(page, component_id, |acc| {
        acc.reorder_items(component_id, ordered_ids)
    })
}

/// Add a link to a link group; order 0 appends after the last link
///
/// # Errors
/// * `ComponentNotFound` / `KindMismatch` - If the component is absent or not a link group
/// * `DuplicateItemId` - If the link id is already used in this group
/// * `ValidationFailed` - If the link text clashes or the URL is invalid
pub fn add_link(page: &mut Page, component_id: &str, link: Link) -> Result<String> {
    edit_link_group(page, component_id, |group| {
        let id = link.id.clone();
        group.add_link(component_id, link)?;
        Ok(id)
    })
}

/// # Errors
/// * `LinkNotFound` - If the link is not in the group
/// * `ValidationFailed` - If the resulting group is invalid
pub fn update_link(
    page: &mut Page,
    component_id: &str,
    link_id: &str,
    patch: LinkPatch,
) -> Result<()> {
    edit_link_group(page, component_id, |group| {
        group.update_link(component_id, link_id, patch)
    })
}

/// # Errors
/// * `LinkNotFound` - If the link is not in the group
/// * `MinimumCardinalityViolation` - If it is the group's last link
pub fn remove_link(page: &mut Page, component_id: &str, link_id: &str) -> Result<Link> {
    edit_link_group(page, component_id, |group| group.remove_link(component_id, link_id))
}

/// # Errors
/// * `LinkNotFound` - If a listed id is not in the group
pub fn reorder_links(page: &mut Page, component_id: &str, ordered_ids: &[String]) -> Result<()> {
    edit_link_group(page, component_id, |group| {
        group.reorder_links(component_id, ordered_ids)
    })
}
