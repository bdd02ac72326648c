use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::model::{ComparisonMode, ComponentDiff};
use crate::model::ordering::sorted_by_order;
use crate::model::Component;

/// Copy of `component` with rich-text timestamps pinned, for comparison only
fn without_content_timestamps(component: &Component) -> Component {
    let mut copy = component.clone();
    for block in copy.payload_mut().rich_text_blocks_mut() {
        block.metadata.created_at = DateTime::<Utc>::default();
        block.metadata.last_modified_at = DateTime::<Utc>::default();
    }
    copy
}

fn same_component(a: &Component, b: &Component, mode: ComparisonMode) -> bool {
    match mode {
        ComparisonMode::Strict => a == b,
        ComparisonMode::IgnoreContentTimestamps => {
            a == b || without_content_timestamps(a) == without_content_timestamps(b)
        }
    }
}

/// Deep, order-sensitive equality of two component collections
///
/// Both sides are compared in display order, so two collections that only
/// differ in storage order are equal.
pub fn components_equal(
    current: &[Component],
    target: &[Component],
    mode: ComparisonMode,
) -> bool {
    if current.len() != target.len() {
        return false;
    }
    sorted_by_order(current)
        .into_iter()
        .zip(sorted_by_order(target))
        .all(|(a, b)| same_component(a, b, mode))
}

/// What replacing `current` with `target` changes, component by component
pub fn diff_components(
    current: &[Component],
    target: &[Component],
    mode: ComparisonMode,
) -> ComponentDiff {
    let current_by_id: HashMap<&str, &Component> = current.iter().map(|c| (c.id(), c)).collect();
    let target_by_id: HashMap<&str, &Component> = target.iter().map(|c| (c.id(), c)).collect();

    let mut diff = ComponentDiff::default();
    for component in sorted_by_order(target) {
        match current_by_id.get(component.id()) {
            None => diff.added.push(component.id().to_string()),
            Some(existing) => {
                if existing.order() != component.order() {
                    diff.reordered.push(component.id().to_string());
                }
                let mut aligned = (*existing).clone();
                aligned.set_order(component.order());
                if !same_component(&aligned, component, mode) {
                    diff.modified.push(component.id().to_string());
                }
            }
        }
    }
    for component in sorted_by_order(current) {
        if !target_by_id.contains_key(component.id()) {
            diff.removed.push(component.id().to_string());
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, ComponentPayload, RichText, TextPayload};

    fn text(id: &str, order: u32, body: &str) -> Component {
        Component::new(
            id,
            order,
            ComponentPayload::Text(TextPayload {
                content: RichText::plain(body),
            }),
        )
    }

    #[test]
    fn test_equal_ignores_storage_order() {
        let a = vec![text("a", 1, "x"), text("b", 2, "y")];
        let b = vec![a[1].clone(), a[0].clone()];
        assert!(components_equal(&a, &b, ComparisonMode::Strict));
    }

    #[test]
    fn test_timestamp_drift_only_matters_in_strict_mode() {
        let a = vec![text("a", 1, "x")];
        let mut drifted = a[0].clone();
        if let ComponentPayload::Text(t) = drifted.payload_mut() {
            t.content.metadata.last_modified_at += chrono::Duration::seconds(30);
        }
        let b = vec![drifted];

        assert!(!components_equal(&a, &b, ComparisonMode::Strict));
        assert!(components_equal(&a, &b, ComparisonMode::IgnoreContentTimestamps));
    }

    #[test]
    fn test_content_version_still_counts_when_ignoring_timestamps() {
        let a = vec![text("a", 1, "x")];
        let mut bumped = a[0].clone();
        if let ComponentPayload::Text(t) = bumped.payload_mut() {
            t.content.metadata.version += 1;
        }
        assert!(!components_equal(
            &a,
            &[bumped],
            ComparisonMode::IgnoreContentTimestamps
        ));
    }

    #[test]
    fn test_diff_classifies_changes() {
        let current = vec![text("a", 1, "x"), text("b", 2, "y"), text("c", 3, "z")];
        let mut moved_b = current[1].clone();
        moved_b.set_order(1);
        let target = vec![
            moved_b,
            Component::new("d", 2, ComponentPayload::default_for(ComponentKind::Card)),
            text("c", 3, "changed"),
        ];

        let diff = diff_components(&current, &target, ComparisonMode::IgnoreContentTimestamps);

        assert_eq!(diff.added, vec!["d"]);
        assert_eq!(diff.removed, vec!["a"]);
        assert_eq!(diff.reordered, vec!["b"]);
        assert_eq!(diff.modified, vec!["c"]);
        assert_eq!(diff.change_count(), 4);
    }

    #[test]
    fn test_diff_of_identical_collections_is_empty() {
        let a = vec![text("a", 1, "x")];
        assert!(diff_components(&a, &a, ComparisonMode::Strict).is_empty());
    }
}
