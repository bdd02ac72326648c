use serde::{Deserialize, Serialize};

use super::shared::{ImageRef, LinkTarget};

/// Hero banner: headline, optional backdrop, optional call to action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerPayload {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    pub button_text: String,
    pub link_url: String,
    #[serde(default)]
    pub link_target: LinkTarget,
}

impl BannerPayload {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            background_image: None,
            call_to_action: None,
        }
    }
}

impl Default for BannerPayload {
    fn default() -> Self {
        Self::new("Welcome")
    }
}
