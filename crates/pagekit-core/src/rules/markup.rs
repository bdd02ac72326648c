//! Best-effort structural checks for rich-text bodies
//!
//! This is not a sanitizer or a parser. HTML is scanned for tag names
//! against an allow-list; JSON documents must look like a rich-text tree.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::model::RichTextFormat;

/// Tags accepted inside HTML rich text
pub const ALLOWED_HTML_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "div", "em", "figcaption", "figure", "h1", "h2", "h3",
    "h4", "h5", "h6", "hr", "i", "img", "li", "ol", "p", "pre", "s", "span", "strong", "sub",
    "sup", "table", "tbody", "td", "th", "thead", "tr", "u", "ul",
];

/// Start of an opening or closing tag; group 1 is the tag name
///
/// The closing `>` is not required, so a tag cut off at the end of the
/// body is still reported.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*/?\s*([A-Za-z][A-Za-z0-9-]*)").expect("valid regex"));

/// Distinct disallowed tag names in an HTML body, lowercased, in first-seen order
pub fn disallowed_html_tags(html: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for cap in TAG_RE.captures_iter(html) {
        let name = cap[1].to_ascii_lowercase();
        if !ALLOWED_HTML_TAGS.contains(&name.as_str()) && !found.contains(&name) {
            found.push(name);
        }
    }
    found
}

/// Problems with a JSON rich-text document, as plain messages
pub fn json_document_problems(data: &str) -> Vec<String> {
    let doc: Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(e) => return vec![format!("not valid JSON: {e}")],
    };
    let Some(obj) = doc.as_object() else {
        return vec!["JSON content must be an object".to_string()];
    };

    let mut problems = Vec::new();
    match obj.get("type") {
        Some(Value::String(_)) => {}
        Some(_) => problems.push("\"type\" must be a string".to_string()),
        None => problems.push("missing \"type\" field".to_string()),
    }
    if !obj.contains_key("content") && !obj.contains_key("children") {
        problems.push("must carry \"content\" or \"children\"".to_string());
    }
    problems
}

/// All structural problems for a body in the given format
pub fn check(format: RichTextFormat, data: &str) -> Vec<String> {
    match format {
        RichTextFormat::Html => disallowed_html_tags(data)
            .into_iter()
            .map(|tag| format!("tag <{tag}> is not allowed"))
            .collect(),
        RichTextFormat::Json => json_document_problems(data),
        RichTextFormat::Markdown | RichTextFormat::Plain => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_html_passes() {
        let html = r#"<h2>Title</h2><p>Some <strong>bold</strong> and <a href="/x">a link</a></p><br/>"#;
        assert!(disallowed_html_tags(html).is_empty());
    }

    #[test]
    fn test_script_and_style_are_rejected() {
        let html = "<p>hi</p><SCRIPT>alert(1)</SCRIPT><style>p{}</style><script src=x></script>";
        assert_eq!(disallowed_html_tags(html), vec!["script", "style"]);
    }

    #[test]
    fn test_unterminated_tag_at_end_is_rejected() {
        assert_eq!(disallowed_html_tags("<p>ok</p><script src=x"), vec!["script"]);
        assert_eq!(check(RichTextFormat::Html, "<p>ok</p><iframe").len(), 1);
    }

    #[test]
    fn test_plain_angle_brackets_are_not_tags() {
        assert!(disallowed_html_tags("<p>1 < 2 and 3 > 2</p>").is_empty());
    }

    #[test]
    fn test_json_document_shape() {
        assert!(json_document_problems(r#"{"type":"doc","content":[]}"#).is_empty());
        assert!(json_document_problems(r#"{"type":"root","children":[]}"#).is_empty());
        assert_eq!(json_document_problems(r#"{"content":[]}"#).len(), 1);
        assert_eq!(json_document_problems(r#"{"type":"doc"}"#).len(), 1);
        assert_eq!(json_document_problems("[1,2]").len(), 1);
        assert_eq!(json_document_problems("{").len(), 1);
    }

    #[test]
    fn test_markdown_is_not_checked() {
        assert!(check(RichTextFormat::Markdown, "<script>").is_empty());
    }
}
