use serde::{Deserialize, Serialize};

use super::rich_text::RichText;
use super::shared::{ImageRef, LinkTarget};

/// Card: title, rich description, optional image and outbound link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    pub title: String,
    pub description: RichText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CardLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLink {
    pub url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub target: LinkTarget,
}

impl CardPayload {
    pub fn new(title: impl Into<String>, description: RichText) -> Self {
        Self {
            title: title.into(),
            description,
            image: None,
            link: None,
        }
    }
}

impl Default for CardPayload {
    fn default() -> Self {
        Self::new("Card title", RichText::html("<p>Card description</p>"))
    }
}
