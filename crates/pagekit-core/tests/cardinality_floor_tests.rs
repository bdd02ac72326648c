//! Cardinality floor: accordions and link groups can never be emptied

mod common;

use pagekit_core::ops::{component_ops, item_ops};
use pagekit_core::{ComponentKind, Page, PageKitError};

#[test]
fn test_last_accordion_item_cannot_be_removed() {
    // GIVEN a page with a default (single-item) accordion
    let mut page = Page::new("tpl");
    let acc = component_ops::add_new_component(&mut page, ComponentKind::Accordion, None, None)
        .unwrap();
    let item = common::first_nested_id(&page, &acc);
    let before = page.clone();

    // WHEN the only item is removed
    let err = item_ops::remove_accordion_item(&mut page, &acc, &item).unwrap_err();

    // THEN the removal is refused and nothing changed
    assert_eq!(
        err,
        PageKitError::MinimumCardinalityViolation {
            component_id: acc,
            collection: "accordion items".to_string(),
        }
    );
    assert_eq!(page, before);
}

#[test]
fn test_last_link_cannot_be_removed() {
    // GIVEN a page with a default (single-link) link group
    let mut page = Page::new("tpl");
    let group =
        component_ops::add_new_component(&mut page, ComponentKind::LinkGroup, None, None).unwrap();
    let link = common::first_nested_id(&page, &group);
    let before = page.clone();

    // WHEN the only link is removed
    let err = item_ops::remove_link(&mut page, &group, &link).unwrap_err();

    // THEN the removal is refused and nothing changed
    assert!(matches!(
        err,
        PageKitError::MinimumCardinalityViolation { .. }
    ));
    assert_eq!(page, before);
}

#[test]
fn test_emptying_through_a_payload_patch_is_also_refused() {
    // GIVEN a link group
    let mut page = Page::new("tpl");
    let group =
        component_ops::add_new_component(&mut page, ComponentKind::LinkGroup, None, None).unwrap();

    // WHEN a merge patch replaces the links with an empty list
    let err = component_ops::update_component(
        &mut page,
        &group,
        pagekit_core::ComponentPatch::payload(serde_json::json!({ "links": [] })),
    )
    .unwrap_err();

    // THEN validation rejects it
    match err {
        PageKitError::ValidationFailed { violations, .. } => {
            assert_eq!(violations[0].field, "payload.links");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
