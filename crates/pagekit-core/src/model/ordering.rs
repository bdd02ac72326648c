//! Shared ordering rules for keyed, ordered collections
//!
//! Page components, accordion items and group links all carry a string key
//! and an integer `order`. Sorting and reordering follow one set of rules,
//! implemented once here.

use crate::errors::{FieldViolation, PageKitError, Result};

/// An element of a keyed, ordered collection
pub trait Ordered {
    fn key(&self) -> &str;
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

/// Return references sorted by `order`, stable for equal orders
///
/// Imported data may not honour the uniqueness invariant, so ties keep
/// their storage order rather than being assumed impossible.
pub fn sorted_by_order<T: Ordered>(items: &[T]) -> Vec<&T> {
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort_by_key(|item| item.order());
    refs
}

/// Reassign orders from a caller-supplied id list
///
/// Listed ids receive `1..=k` in listed order. Unlisted elements follow,
/// keeping their previous relative order, numbered `k+1..`. The collection
/// itself is left sorted by the new order.
///
/// Returns the listed ids that are not present, without touching `items`.
/// Duplicate ids in the list are reported the same way, since honouring
/// them would hand one element two positions.
pub fn reorder_by_keys<T: Ordered>(
    items: &mut Vec<T>,
    ordered_keys: &[String],
) -> std::result::Result<(), Vec<String>> {
    let mut rejected = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for key in ordered_keys {
        if !seen.insert(key.as_str()) || !items.iter().any(|item| item.key() == key) {
            rejected.push(key.clone());
        }
    }
    if !rejected.is_empty() {
        return Err(rejected);
    }

    let mut remaining: Vec<T> = std::mem::take(items);
    remaining.sort_by_key(|item| item.order());

    let mut reordered = Vec::with_capacity(remaining.len());
    for key in ordered_keys {
        if let Some(pos) = remaining.iter().position(|item| item.key() == key) {
            reordered.push(remaining.remove(pos));
        }
    }
    reordered.extend(remaining);

    for (index, item) in reordered.iter_mut().enumerate() {
        item.set_order(index as u32 + 1);
    }
    *items = reordered;
    Ok(())
}

/// Next free order: one past the current maximum, or 1 for an empty collection
///
/// # Errors
/// Returns `ValidationFailed` on `order` for `owner_id` when the maximum
/// is already `u32::MAX`.
pub fn next_order<T: Ordered>(owner_id: &str, items: &[T]) -> Result<u32> {
    match items.iter().map(Ordered::order).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| PageKitError::ValidationFailed {
            entity_id: owner_id.to_string(),
            violations: vec![FieldViolation::new(
                "order",
                format!("no order left after {max}; reorder to compact"),
            )],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(String, u32);

    impl Ordered for Row {
        fn key(&self) -> &str {
            &self.0
        }
        fn order(&self) -> u32 {
            self.1
        }
        fn set_order(&mut self, order: u32) {
            self.1 = order;
        }
    }

    fn rows(entries: &[(&str, u32)]) -> Vec<Row> {
        entries.iter().map(|(k, o)| Row(k.to_string(), *o)).collect()
    }

    #[test]
    fn test_reorder_listed_first_then_unlisted_in_original_order() {
        let mut items = rows(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        reorder_by_keys(&mut items, &["c".to_string(), "a".to_string()]).unwrap();

        assert_eq!(items, rows(&[("c", 1), ("a", 2), ("b", 3), ("d", 4)]));
    }

    #[test]
    fn test_reorder_uses_order_not_storage_position_for_unlisted() {
        let mut items = rows(&[("x", 9), ("y", 2), ("z", 5)]);
        reorder_by_keys(&mut items, &["x".to_string()]).unwrap();

        assert_eq!(items, rows(&[("x", 1), ("y", 2), ("z", 3)]));
    }

    #[test]
    fn test_reorder_rejects_unknown_and_duplicate_keys_without_mutation() {
        let original = rows(&[("a", 1), ("b", 2)]);
        let mut items = original.clone();

        let err = reorder_by_keys(
            &mut items,
            &["a".to_string(), "nope".to_string(), "a".to_string()],
        )
        .unwrap_err();

        assert_eq!(err, vec!["nope".to_string(), "a".to_string()]);
        assert_eq!(items, original);
    }

    #[test]
    fn test_sorted_by_order_is_stable_for_ties() {
        let items = rows(&[("first", 3), ("second", 1), ("third", 3)]);
        let keys: Vec<&str> = sorted_by_order(&items).iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["second", "first", "third"]);
    }

    #[test]
    fn test_next_order() {
        assert_eq!(next_order::<Row>("p", &[]).unwrap(), 1);
        assert_eq!(next_order("p", &rows(&[("a", 4), ("b", 2)])).unwrap(), 5);
    }

    #[test]
    fn test_next_order_after_max_is_a_validation_error() {
        let err = next_order("p", &rows(&[("a", u32::MAX)])).unwrap_err();

        match err {
            PageKitError::ValidationFailed {
                entity_id,
                violations,
            } => {
                assert_eq!(entity_id, "p");
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "order");
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }
}
