use std::collections::{BTreeMap, HashSet};

use crate::errors::{FieldViolation, PageKitError, Result};
use crate::model::{Component, Page};

/// A page-level rule broken by a component collection
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    DuplicateComponentId {
        component_id: String,
    },
    DuplicateComponentOrder {
        order: u32,
        component_ids: Vec<String>,
    },
    InvalidComponent {
        component_id: String,
        violations: Vec<FieldViolation>,
    },
}

impl InvariantViolation {
    /// Flatten into field violations addressed from the page root
    pub fn into_field_violations(self) -> Vec<FieldViolation> {
        match self {
            InvariantViolation::DuplicateComponentId { component_id } => vec![FieldViolation::new(
                "components.id",
                format!("component id {component_id} appears more than once"),
            )],
            InvariantViolation::DuplicateComponentOrder {
                order,
                component_ids,
            } => vec![FieldViolation::new(
                "components.order",
                format!("order {order} is shared by {}", component_ids.join(", ")),
            )],
            InvariantViolation::InvalidComponent {
                component_id,
                violations,
            } => violations
                .into_iter()
                .map(|v| {
                    FieldViolation::new(format!("components[{component_id}].{}", v.field), v.message)
                })
                .collect(),
        }
    }
}

/// Component ids that occur more than once, each reported once
pub fn find_duplicate_ids(components: &[Component]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for component in components {
        if !seen.insert(component.id()) && !duplicates.iter().any(|d| d == component.id()) {
            duplicates.push(component.id().to_string());
        }
    }
    duplicates
}

/// Orders shared by more than one component, ascending
///
/// Returns list of (order, component_ids) tuples
pub fn find_duplicate_orders(components: &[Component]) -> Vec<(u32, Vec<String>)> {
    let mut by_order: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for component in components {
        by_order
            .entry(component.order())
            .or_default()
            .push(component.id().to_string());
    }
    by_order.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
}

/// Check uniqueness and per-variant validity of a component collection
pub fn audit_components(components: &[Component]) -> Vec<InvariantViolation> {
    let mut violations: Vec<InvariantViolation> = find_duplicate_ids(components)
        .into_iter()
        .map(|component_id| InvariantViolation::DuplicateComponentId { component_id })
        .collect();

    violations.extend(
        find_duplicate_orders(components)
            .into_iter()
            .map(|(order, component_ids)| InvariantViolation::DuplicateComponentOrder {
                order,
                component_ids,
            }),
    );

    for component in components {
        let report = component.validate();
        if !report.is_valid() {
            violations.push(InvariantViolation::InvalidComponent {
                component_id: component.id().to_string(),
                violations: report.into_violations(),
            });
        }
    }
    violations
}

/// Audit a hydrated or imported page
pub fn audit_page(page: &Page) -> Vec<InvariantViolation> {
    audit_components(page.components())
}

/// `audit_page` as a `Result`
///
/// # Errors
/// Returns `PageKitError::ValidationFailed` for the page if any rule is broken.
pub fn ensure_page_valid(page: &Page) -> Result<()> {
    let violations: Vec<FieldViolation> = audit_page(page)
        .into_iter()
        .flat_map(InvariantViolation::into_field_violations)
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(PageKitError::ValidationFailed {
            entity_id: page.id.clone(),
            violations,
        })
    }
}
