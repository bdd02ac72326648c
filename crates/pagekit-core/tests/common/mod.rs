use pagekit_core::model::{CardPayload, ComponentPayload};
use pagekit_core::ops::component_ops;
use pagekit_core::{ComponentKind, Page};

/// A page holding a text component (order 1) and a card (order 2)
///
/// Returns (page, text_id, card_id)
#[allow(dead_code)]
pub fn text_and_card_page() -> (Page, String, String) {
    let mut page = Page::new("tpl-test");
    let text = component_ops::add_new_component(&mut page, ComponentKind::Text, Some(1), None)
        .expect("text component");
    let card = component_ops::add_new_component(&mut page, ComponentKind::Card, Some(2), None)
        .expect("card component");
    (page, text, card)
}

/// Card payload of `component_id`; panics if absent or not a card
#[allow(dead_code)]
pub fn card<'a>(components: &'a [pagekit_core::Component], component_id: &str) -> &'a CardPayload {
    let component = components
        .iter()
        .find(|c| c.id() == component_id)
        .unwrap_or_else(|| panic!("component {component_id} missing"));
    match component.payload() {
        ComponentPayload::Card(card) => card,
        other => panic!("expected card, got {:?}", other.kind()),
    }
}

/// First nested item id (accordion item or link) of a component
#[allow(dead_code)]
pub fn first_nested_id(page: &Page, component_id: &str) -> String {
    match page.component(component_id).map(|c| c.payload()) {
        Some(ComponentPayload::Accordion(acc)) => acc.items[0].id.clone(),
        Some(ComponentPayload::LinkGroup(group)) => group.links[0].id.clone(),
        other => panic!("no nested collection on {component_id}: {other:?}"),
    }
}
