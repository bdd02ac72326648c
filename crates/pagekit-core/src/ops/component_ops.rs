use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::patch::merge_patch;
use crate::errors::{FieldViolation, PageKitError, Result};
use crate::model::ordering::{next_order, reorder_by_keys, sorted_by_order};
use crate::model::{Component, ComponentKind, ComponentPayload, Page, PageTemplate};

/// Partial update for one component
///
/// `payload` is a JSON merge patch applied over the component's current
/// payload body. `kind`, when present, must name the current kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ComponentPatch {
    pub fn order(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Default::default()
        }
    }

    pub fn payload(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_none() && self.kind.is_none() && self.payload.is_none()
    }
}

fn position_of(page: &Page, component_id: &str) -> Result<usize> {
    page.components()
        .iter()
        .position(|c| c.id() == component_id)
        .ok_or_else(|| PageKitError::ComponentNotFound {
            page_id: page.id.clone(),
            component_id: component_id.to_string(),
        })
}

fn check_order_free(page: &Page, order: u32, except_id: Option<&str>) -> Result<()> {
    match page
        .components()
        .iter()
        .find(|c| c.order() == order && Some(c.id()) != except_id)
    {
        Some(holder) => Err(PageKitError::DuplicateComponentOrder {
            page_id: page.id.clone(),
            order,
            holder_id: holder.id().to_string(),
        }),
        None => Ok(()),
    }
}

/// Rebuild a payload from its body after merging `patch` over it
fn merged_payload(
    component_id: &str,
    current: &ComponentPayload,
    patch: &Value,
) -> Result<ComponentPayload> {
    let mut body = current.body_json()?;
    merge_patch(&mut body, patch);
    ComponentPayload::from_body(current.kind(), body).map_err(|e| {
        PageKitError::ValidationFailed {
            entity_id: component_id.to_string(),
            violations: vec![FieldViolation::new("payload", e.to_string())],
        }
    })
}

/// Rich-text metadata continues from `previous`; changed bodies count as writes
fn carry_rich_text_metadata(previous: &ComponentPayload, next: &mut ComponentPayload) {
    match (previous, next) {
        (ComponentPayload::Text(old), ComponentPayload::Text(new)) => {
            new.content.carry_metadata_from(&old.content);
        }
        (ComponentPayload::Card(old), ComponentPayload::Card(new)) => {
            new.description.carry_metadata_from(&old.description);
        }
        (ComponentPayload::Accordion(old), ComponentPayload::Accordion(new)) => {
            for item in &mut new.items {
                if let Some(prior) = old.item(&item.id) {
                    item.content.carry_metadata_from(&prior.content);
                }
            }
        }
        _ => {}
    }
}

/// Build a new component of `kind`, optionally patching its default payload
///
/// The id is a fresh UUID v7. Nothing is validated here; callers validate
/// when the component is committed to a page.
///
/// # Errors
/// * `ValidationFailed` - If the merged payload no longer fits the kind's shape
pub fn build_component(
    kind: ComponentKind,
    order: u32,
    payload: Option<&Value>,
) -> Result<Component> {
    let id = Uuid::now_v7().to_string();
    let default = ComponentPayload::default_for(kind);
    let payload = match payload {
        Some(patch) => merged_payload(&id, &default, patch)?,
        None => default,
    };
    Ok(Component::new(id, order, payload))
}

/// Add a component to a page
///
/// # Errors
/// * `DuplicateComponentId` - If the id is already on the page
/// * `DuplicateComponentOrder` - If another component holds the order
/// * `ValidationFailed` - If the payload breaks its kind's rules
pub fn add_component(page: &mut Page, component: Component) -> Result<()> {
    if page.component(component.id()).is_some() {
        return Err(PageKitError::DuplicateComponentId {
            page_id: page.id.clone(),
            component_id: component.id().to_string(),
        });
    }
    check_order_free(page, component.order(), None)?;
    component.ensure_valid()?;

    tracing::debug!(
        page_id = %page.id,
        component_id = %component.id(),
        kind = %component.kind(),
        "component added"
    );
    page.components_mut().push(component);
    page.touch();
    Ok(())
}

/// Create a default component of `kind` at `order` (or after the last one)
///
/// # Returns
/// The id of the new component
///
/// # Errors
/// Same as `add_component`, plus payload shape errors from `build_component`.
pub fn add_new_component(
    page: &mut Page,
    kind: ComponentKind,
    order: Option<u32>,
    payload: Option<&Value>,
) -> Result<String> {
    let order = match order {
        Some(order) => order,
        None => next_order(&page.id, page.components())?,
    };
    let component = build_component(kind, order, payload)?;
    let id = component.id().to_string();
    add_component(page, component)?;
    Ok(id)
}

/// Merge a partial update into a component
///
/// The merged component is validated in full before it replaces the
/// original; on any failure the page is left as it was.
///
/// # Errors
/// * `ComponentNotFound` - If the id is not on the page
/// * `KindImmutable` - If the patch names a different kind
/// * `DuplicateComponentOrder` - If the new order is held by another component
///   and the merged payload is otherwise valid
/// * `ValidationFailed` - If the merged payload breaks any rule; an order
///   clash is listed among the violations on `order`
pub fn update_component(
    page: &mut Page,
    component_id: &str,
    patch: ComponentPatch,
) -> Result<()> {
    let index = position_of(page, component_id)?;
    let current = &page.components()[index];

    if let Some(requested) = &patch.kind {
        if ComponentKind::parse(requested) != Some(current.kind()) {
            return Err(PageKitError::KindImmutable {
                component_id: component_id.to_string(),
                current: current.kind().to_string(),
                requested: requested.clone(),
            });
        }
    }

    let mut candidate = current.clone();
    if let Some(payload_patch) = &patch.payload {
        let mut payload = merged_payload(component_id, current.payload(), payload_patch)?;
        carry_rich_text_metadata(current.payload(), &mut payload);
        candidate.replace_payload(payload)?;
    }

    let mut violations = candidate.validate().into_violations();
    let order_clash = patch
        .order
        .and_then(|order| check_order_free(page, order, Some(component_id)).err());
    match order_clash {
        Some(clash) if violations.is_empty() => return Err(clash),
        Some(clash) => violations.insert(0, FieldViolation::new("order", clash.to_string())),
        None => {}
    }
    if !violations.is_empty() {
        return Err(PageKitError::ValidationFailed {
            entity_id: component_id.to_string(),
            violations,
        });
    }
    if let Some(order) = patch.order {
        candidate.set_order(order);
    }

    page.components_mut()[index] = candidate;
    page.touch();
    Ok(())
}

/// Remove a component from a page
///
/// There is no minimum component count at page level.
///
/// # Errors
/// * `ComponentNotFound` - If the id is not on the page
pub fn remove_component(page: &mut Page, component_id: &str) -> Result<Component> {
    let index = position_of(page, component_id)?;
    let removed = page.components_mut().remove(index);
    page.touch();
    Ok(removed)
}

/// Reassign orders from a list of component ids
///
/// Listed components get `1..=k` in list order; the rest follow in their
/// previous relative order.
///
/// # Errors
/// * `UnknownComponentIds` - If any listed id is not on the page (or is listed twice)
pub fn reorder_components(page: &mut Page, ordered_ids: &[String]) -> Result<()> {
    let page_id = page.id.clone();
    reorder_by_keys(page.components_mut(), ordered_ids)
        .map_err(|ids| PageKitError::UnknownComponentIds { page_id, ids })?;
    page.touch();
    Ok(())
}

/// Components sorted by order ascending, stable for equal orders
pub fn get_ordered_components(page: &Page) -> Vec<&Component> {
    sorted_by_order(page.components())
}

/// Replace every component with the blocks of a template
///
/// Declared block types outside the closed kind set become `Text`. Orders
/// run from 1 in block order.
///
/// # Errors
/// * `ValidationFailed` - If a block's defaults produce an invalid component
pub fn initialize_from_template(page: &mut Page, template: &PageTemplate) -> Result<()> {
    let mut components = Vec::with_capacity(template.blocks.len());
    for (index, block) in template.blocks.iter().enumerate() {
        let component = build_component(block.kind(), index as u32 + 1, block.defaults.as_ref())?;
        component.ensure_valid()?;
        components.push(component);
    }

    tracing::debug!(
        page_id = %page.id,
        template_id = %template.id,
        component_count = components.len(),
        "page initialized from template"
    );
    page.template_id = template.id.clone();
    page.replace_components(components);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentPayload, TemplateBlock};
    use serde_json::json;

    fn page_with_text_and_card() -> (Page, String, String) {
        let mut page = Page::new("t1");
        let text = add_new_component(&mut page, ComponentKind::Text, None, None).unwrap();
        let card = add_new_component(&mut page, ComponentKind::Card, None, None).unwrap();
        (page, text, card)
    }

    #[test]
    fn test_add_component_rejects_duplicate_id() {
        let (mut page, text, _) = page_with_text_and_card();
        let dup = Component::new(text, 9, ComponentPayload::default_for(ComponentKind::Text));

        let err = add_component(&mut page, dup).unwrap_err();

        assert!(matches!(err, PageKitError::DuplicateComponentId { .. }));
        assert_eq!(page.component_count(), 2);
    }

    #[test]
    fn test_add_component_rejects_duplicate_order() {
        let (mut page, text, _) = page_with_text_and_card();
        let clash = Component::new("fresh", 1, ComponentPayload::default_for(ComponentKind::Banner));

        let err = add_component(&mut page, clash).unwrap_err();

        assert_eq!(
            err,
            PageKitError::DuplicateComponentOrder {
                page_id: page.id.clone(),
                order: 1,
                holder_id: text,
            }
        );
    }

    #[test]
    fn test_update_merges_payload_and_keeps_other_fields() {
        let (mut page, _, card) = page_with_text_and_card();

        update_component(
            &mut page,
            &card,
            ComponentPatch::payload(json!({ "title": "New Title" })),
        )
        .unwrap();

        match page.component(&card).unwrap().payload() {
            ComponentPayload::Card(c) => {
                assert_eq!(c.title, "New Title");
                assert_eq!(c.description.data, "<p>Card description</p>");
                assert_eq!(c.description.metadata.version, 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_update_rich_text_records_write() {
        let (mut page, text, _) = page_with_text_and_card();

        update_component(
            &mut page,
            &text,
            ComponentPatch::payload(json!({ "content": { "data": "<p>Changed</p>" } })),
        )
        .unwrap();

        match page.component(&text).unwrap().payload() {
            ComponentPayload::Text(t) => {
                assert_eq!(t.content.data, "<p>Changed</p>");
                assert_eq!(t.content.metadata.version, 2);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_update_rejects_order_held_by_other_component() {
        let (mut page, text, card) = page_with_text_and_card();
        let before = page.clone();

        let err = update_component(&mut page, &card, ComponentPatch::order(1)).unwrap_err();

        assert!(matches!(
            err,
            PageKitError::DuplicateComponentOrder { ref holder_id, .. } if *holder_id == text
        ));
        assert_eq!(page, before);
    }

    #[test]
    fn test_update_to_own_order_is_allowed() {
        let (mut page, _, card) = page_with_text_and_card();
        update_component(&mut page, &card, ComponentPatch::order(2)).unwrap();
        assert_eq!(page.component(&card).unwrap().order(), 2);
    }

    #[test]
    fn test_update_rejects_kind_change() {
        let (mut page, _, card) = page_with_text_and_card();
        let patch = ComponentPatch {
            kind: Some("banner".to_string()),
            ..Default::default()
        };

        let err = update_component(&mut page, &card, patch).unwrap_err();

        assert!(matches!(err, PageKitError::KindImmutable { .. }));
    }

    #[test]
    fn test_update_invalid_merge_leaves_page_untouched() {
        let (mut page, _, card) = page_with_text_and_card();
        let before = page.clone();

        let err = update_component(
            &mut page,
            &card,
            ComponentPatch::payload(json!({ "title": "", "image": { "url": "nope" } })),
        )
        .unwrap_err();

        match err {
            PageKitError::ValidationFailed { violations, .. } => assert_eq!(violations.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(page, before);
    }

    #[test]
    fn test_update_shape_error_is_validation_failure() {
        let (mut page, _, card) = page_with_text_and_card();

        let err = update_component(
            &mut page,
            &card,
            ComponentPatch::payload(json!({ "title": null })),
        )
        .unwrap_err();

        assert!(matches!(err, PageKitError::ValidationFailed { .. }));
    }

    #[test]
    fn test_remove_missing_component() {
        let (mut page, _, _) = page_with_text_and_card();
        let err = remove_component(&mut page, "ghost").unwrap_err();
        assert!(matches!(err, PageKitError::ComponentNotFound { .. }));
    }

    #[test]
    fn test_reorder_appends_unlisted() {
        let (mut page, text, card) = page_with_text_and_card();
        let banner = add_new_component(&mut page, ComponentKind::Banner, None, None).unwrap();

        reorder_components(&mut page, &[banner.clone()]).unwrap();

        let ordered: Vec<(&str, u32)> = get_ordered_components(&page)
            .iter()
            .map(|c| (c.id(), c.order()))
            .collect();
        assert_eq!(
            ordered,
            vec![(banner.as_str(), 1), (text.as_str(), 2), (card.as_str(), 3)]
        );
    }

    #[test]
    fn test_reorder_unknown_id_fails_without_change() {
        let (mut page, text, _) = page_with_text_and_card();
        let before = page.clone();

        let err = reorder_components(&mut page, &[text, "ghost".to_string()]).unwrap_err();

        assert_eq!(
            err,
            PageKitError::UnknownComponentIds {
                page_id: page.id.clone(),
                ids: vec!["ghost".to_string()],
            }
        );
        assert_eq!(page, before);
    }

    #[test]
    fn test_initialize_from_template_maps_declared_types() {
        let (mut page, _, _) = page_with_text_and_card();
        let template = PageTemplate::new(
            "landing",
            vec![
                TemplateBlock::new("banner").with_defaults(json!({ "headline": "Hi" })),
                TemplateBlock::new("video"),
                TemplateBlock::new("linkgroup"),
                TemplateBlock::new("container"),
            ],
        );

        initialize_from_template(&mut page, &template).unwrap();

        let kinds: Vec<(ComponentKind, u32)> = get_ordered_components(&page)
            .iter()
            .map(|c| (c.kind(), c.order()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ComponentKind::Banner, 1),
                (ComponentKind::Text, 2),
                (ComponentKind::LinkGroup, 3),
                (ComponentKind::Container, 4),
            ]
        );
        assert_eq!(page.template_id, "landing");
        match page.ordered_components()[0].payload() {
            ComponentPayload::Banner(b) => assert_eq!(b.headline, "Hi"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
