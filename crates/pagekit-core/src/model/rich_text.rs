use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Markup dialect of a rich-text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RichTextFormat {
    Html,
    Markdown,
    Json,
    Plain,
}

impl fmt::Display for RichTextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RichTextFormat::Html => "html",
            RichTextFormat::Markdown => "markdown",
            RichTextFormat::Json => "json",
            RichTextFormat::Plain => "plain",
        };
        f.write_str(s)
    }
}

/// Bookkeeping carried alongside every rich-text body
///
/// `version` counts content writes, starting at 1 for freshly created
/// content. `last_modified_at` moves on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextMetadata {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

impl RichTextMetadata {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            created_at: now,
            last_modified_at: now,
        }
    }
}

impl Default for RichTextMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Rich-text payload embedded in Text, Card descriptions and accordion items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    pub format: RichTextFormat,
    pub data: String,
    #[serde(default)]
    pub metadata: RichTextMetadata,
}

impl RichText {
    pub fn new(format: RichTextFormat, data: impl Into<String>) -> Self {
        Self {
            format,
            data: data.into(),
            metadata: RichTextMetadata::new(),
        }
    }

    pub fn html(data: impl Into<String>) -> Self {
        Self::new(RichTextFormat::Html, data)
    }

    pub fn plain(data: impl Into<String>) -> Self {
        Self::new(RichTextFormat::Plain, data)
    }

    /// Replace the body and record the write
    pub fn write(&mut self, format: RichTextFormat, data: impl Into<String>) {
        self.format = format;
        self.data = data.into();
        self.touch();
    }

    /// Record a content write that already happened in place
    pub fn touch(&mut self) {
        self.metadata.version = self.metadata.version.saturating_add(1);
        self.metadata.last_modified_at = Utc::now();
    }

    /// True when format and body match, regardless of metadata
    pub fn same_content(&self, other: &RichText) -> bool {
        self.format == other.format && self.data == other.data
    }

    /// Continue `previous`'s metadata, recording a write if the body differs
    ///
    /// Metadata is owned by the model. After a merge patch the body may come
    /// from the caller, but version and timestamps carry on from the stored
    /// block.
    pub fn carry_metadata_from(&mut self, previous: &RichText) {
        let changed = !self.same_content(previous);
        self.metadata = previous.metadata.clone();
        if changed {
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rich_text_starts_at_version_one() {
        let rt = RichText::html("<p>Hello</p>");
        assert_eq!(rt.metadata.version, 1);
        assert_eq!(rt.metadata.created_at, rt.metadata.last_modified_at);
    }

    #[test]
    fn test_write_refreshes_metadata() {
        let mut rt = RichText::plain("before");
        let created = rt.metadata.created_at;

        std::thread::sleep(std::time::Duration::from_millis(5));
        rt.write(RichTextFormat::Markdown, "# after");

        assert_eq!(rt.data, "# after");
        assert_eq!(rt.format, RichTextFormat::Markdown);
        assert_eq!(rt.metadata.version, 2);
        assert_eq!(rt.metadata.created_at, created);
        assert!(rt.metadata.last_modified_at > created);
    }

    #[test]
    fn test_carry_metadata_keeps_identical_body_untouched() {
        let previous = RichText::plain("same");
        let mut next = RichText::plain("same");
        next.metadata.version = 7;

        next.carry_metadata_from(&previous);

        assert_eq!(next, previous);
    }

    #[test]
    fn test_carry_metadata_counts_changed_body() {
        let previous = RichText::plain("old");
        let mut next = RichText::plain("new");

        next.carry_metadata_from(&previous);

        assert_eq!(next.metadata.version, 2);
        assert_eq!(next.metadata.created_at, previous.metadata.created_at);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let rt = RichText::plain("x");
        let json = serde_json::to_value(&rt).unwrap();
        assert_eq!(json["format"], "plain");
        assert!(json["metadata"].get("lastModifiedAt").is_some());
        assert!(json["metadata"].get("createdAt").is_some());
    }
}
