//! Command inventory for page mutations
//!
//! Every mutating operation on a page's component collection has a
//! command here; `apply()` is the single entry point that runs them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    AccordionItem, AccordionItemPatch, Component, ComponentKind, Link, LinkPatch, PageTemplate,
};
use crate::ops::ComponentPatch;

/// Commands are processed by `apply()`, which takes ownership of the page,
/// executes the command and returns a new valid page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Add a fully built component
    ComponentAdd { component: Component },

    /// Create a default component of `kind`, optionally patching its payload
    ComponentCreate {
        kind: ComponentKind,
        order: Option<u32>,
        payload: Option<Value>,
    },

    ComponentUpdate {
        component_id: String,
        patch: ComponentPatch,
    },

    ComponentRemove { component_id: String },

    ComponentReorder { ordered_ids: Vec<String> },

    /// Replace the whole collection with a template's blocks
    InitializeFromTemplate { template: PageTemplate },

    AccordionItemAdd {
        component_id: String,
        item: AccordionItem,
    },

    AccordionItemUpdate {
        component_id: String,
        item_id: String,
        patch: AccordionItemPatch,
    },

    AccordionItemRemove {
        component_id: String,
        item_id: String,
    },

    AccordionItemReorder {
        component_id: String,
        ordered_ids: Vec<String>,
    },

    LinkAdd { component_id: String, link: Link },

    LinkUpdate {
        component_id: String,
        link_id: String,
        patch: LinkPatch,
    },

    LinkRemove {
        component_id: String,
        link_id: String,
    },

    LinkReorder {
        component_id: String,
        ordered_ids: Vec<String>,
    },
}

impl Command {
    /// Stable operation name used in logs and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::ComponentAdd { .. } => "component_add",
            Command::ComponentCreate { .. } => "component_create",
            Command::ComponentUpdate { .. } => "component_update",
            Command::ComponentRemove { .. } => "component_remove",
            Command::ComponentReorder { .. } => "component_reorder",
            Command::InitializeFromTemplate { .. } => "initialize_from_template",
            Command::AccordionItemAdd { .. } => "accordion_item_add",
            Command::AccordionItemUpdate { .. } => "accordion_item_update",
            Command::AccordionItemRemove { .. } => "accordion_item_remove",
            Command::AccordionItemReorder { .. } => "accordion_item_reorder",
            Command::LinkAdd { .. } => "link_add",
            Command::LinkUpdate { .. } => "link_update",
            Command::LinkRemove { .. } => "link_remove",
            Command::LinkReorder { .. } => "link_reorder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_tag() {
        let cmd = Command::ComponentRemove {
            component_id: "c1".to_string(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["op"], "component_remove");
        assert_eq!(json["component_id"], "c1");
        assert_eq!(cmd.op_name(), "component_remove");
    }

    #[test]
    fn test_command_from_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"op":"component_update","component_id":"c1","patch":{"payload":{"title":"T"}}}"#,
        )
        .unwrap();

        match cmd {
            Command::ComponentUpdate {
                component_id,
                patch,
            } => {
                assert_eq!(component_id, "c1");
                assert!(patch.order.is_none());
                assert_eq!(patch.payload.unwrap()["title"], "T");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
