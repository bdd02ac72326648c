use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::component::ComponentKind;

/// Page template as handed in by the (external) template catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTemplate {
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<TemplateBlock>,
}

/// One block of a template
///
/// `defaults` is merged over the kind's default payload as a JSON merge
/// patch, so a block only has to name the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,
}

impl TemplateBlock {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            defaults: None,
        }
    }

    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn kind(&self) -> ComponentKind {
        ComponentKind::from_declared_type(&self.block_type)
    }
}

impl PageTemplate {
    pub fn new(id: impl Into<String>, blocks: Vec<TemplateBlock>) -> Self {
        Self {
            id: id.into(),
            blocks,
        }
    }
}
