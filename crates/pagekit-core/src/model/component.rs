use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use super::accordion::AccordionPayload;
use super::banner::BannerPayload;
use super::card::CardPayload;
use super::link_group::LinkGroupPayload;
use super::ordering::Ordered;
use super::rich_text::RichText;
use crate::errors::{PageKitError, Result};
use crate::rules::validation::{validate_component, ValidationReport};

/// Closed set of component kinds
///
/// `Image`, `Button` and `Container` are reserved: templates may declare
/// them and stored data may carry them, but they have no typed payload yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Text,
    Banner,
    Card,
    Accordion,
    LinkGroup,
    Image,
    Button,
    Container,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Text,
        ComponentKind::Banner,
        ComponentKind::Card,
        ComponentKind::Accordion,
        ComponentKind::LinkGroup,
        ComponentKind::Image,
        ComponentKind::Button,
        ComponentKind::Container,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Text => "text",
            ComponentKind::Banner => "banner",
            ComponentKind::Card => "card",
            ComponentKind::Accordion => "accordion",
            ComponentKind::LinkGroup => "linkgroup",
            ComponentKind::Image => "image",
            ComponentKind::Button => "button",
            ComponentKind::Container => "container",
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            ComponentKind::Image | ComponentKind::Button | ComponentKind::Container
        )
    }

    /// Parse a wire tag; `None` for anything outside the closed set
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag.trim()))
    }

    /// Map a template block's declared type, falling back to `Text`
    pub fn from_declared_type(declared: &str) -> Self {
        Self::parse(declared).unwrap_or(ComponentKind::Text)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub content: RichText,
}

impl Default for TextPayload {
    fn default() -> Self {
        Self {
            content: RichText::html("<p>Add your text here</p>"),
        }
    }
}

/// Variant payload, tagged on the wire as `{"kind": ..., "payload": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum ComponentPayload {
    Text(TextPayload),
    Banner(BannerPayload),
    Card(CardPayload),
    Accordion(AccordionPayload),
    LinkGroup(LinkGroupPayload),
    /// Reserved kinds keep whatever payload they arrived with
    Image(Value),
    Button(Value),
    Container(Value),
}

impl ComponentPayload {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentPayload::Text(_) => ComponentKind::Text,
            ComponentPayload::Banner(_) => ComponentKind::Banner,
            ComponentPayload::Card(_) => ComponentKind::Card,
            ComponentPayload::Accordion(_) => ComponentKind::Accordion,
            ComponentPayload::LinkGroup(_) => ComponentKind::LinkGroup,
            ComponentPayload::Image(_) => ComponentKind::Image,
            ComponentPayload::Button(_) => ComponentKind::Button,
            ComponentPayload::Container(_) => ComponentKind::Container,
        }
    }

    /// Default payload for a kind, used by templates and `create_default`
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Text => ComponentPayload::Text(TextPayload::default()),
            ComponentKind::Banner => ComponentPayload::Banner(BannerPayload::default()),
            ComponentKind::Card => ComponentPayload::Card(CardPayload::default()),
            ComponentKind::Accordion => ComponentPayload::Accordion(AccordionPayload::default()),
            ComponentKind::LinkGroup => ComponentPayload::LinkGroup(LinkGroupPayload::default()),
            ComponentKind::Image => ComponentPayload::Image(Value::Object(Default::default())),
            ComponentKind::Button => ComponentPayload::Button(Value::Object(Default::default())),
            ComponentKind::Container => {
                ComponentPayload::Container(Value::Object(Default::default()))
            }
        }
    }

    /// Rich-text blocks in document order, for metadata bookkeeping
    pub fn rich_text_blocks(&self) -> Vec<&RichText> {
        match self {
            ComponentPayload::Text(text) => vec![&text.content],
            ComponentPayload::Card(card) => vec![&card.description],
            ComponentPayload::Accordion(acc) => acc.items.iter().map(|i| &i.content).collect(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn rich_text_blocks_mut(&mut self) -> Vec<&mut RichText> {
        match self {
            ComponentPayload::Text(text) => vec![&mut text.content],
            ComponentPayload::Card(card) => vec![&mut card.description],
            ComponentPayload::Accordion(acc) => {
                acc.items.iter_mut().map(|i| &mut i.content).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Inner payload only, without the kind tag
    pub fn body_json(&self) -> Result<Value> {
        let tagged = serde_json::to_value(self)?;
        Ok(tagged.get("payload").cloned().unwrap_or(Value::Null))
    }

    /// Rebuild a payload of `kind` from an untagged body
    pub fn from_body(kind: ComponentKind, body: Value) -> Result<Self> {
        let tagged = serde_json::json!({ "kind": kind.as_str(), "payload": body });
        Ok(serde_json::from_value(tagged)?)
    }
}

/// One typed content block on a page
///
/// The kind is fixed by the payload variant and never changes after
/// creation; updates go through `ops::component_ops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    id: String,
    order: u32,
    #[serde(flatten)]
    payload: ComponentPayload,
}

impl Component {
    pub fn new(id: impl Into<String>, order: u32, payload: ComponentPayload) -> Self {
        Self {
            id: id.into(),
            order,
            payload,
        }
    }

    /// Fresh component of `kind` with default content and a new UUID v7 id
    pub fn create_default(kind: ComponentKind, order: u32) -> Self {
        Self::new(
            Uuid::now_v7().to_string(),
            order,
            ComponentPayload::default_for(kind),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn kind(&self) -> ComponentKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &ComponentPayload {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut ComponentPayload {
        &mut self.payload
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Swap in a payload of the same kind
    pub(crate) fn replace_payload(&mut self, payload: ComponentPayload) -> Result<()> {
        if payload.kind() != self.kind() {
            return Err(PageKitError::KindImmutable {
                component_id: self.id.clone(),
                current: self.kind().to_string(),
                requested: payload.kind().to_string(),
            });
        }
        self.payload = payload;
        Ok(())
    }

    /// Run every rule for this component's kind
    pub fn validate(&self) -> ValidationReport {
        validate_component(self)
    }

    /// Like `validate`, but as a `Result` carrying every violation
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().into_result(&self.id)
    }
}

impl Ordered for Component {
    fn key(&self) -> &str {
        &self.id
    }
    fn order(&self) -> u32 {
        self.order
    }
    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}
