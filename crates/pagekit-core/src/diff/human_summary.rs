//! Human-readable summary renderer for component diffs.

use crate::diff::model::ComponentDiff;

/// Render a short text summary of a [`ComponentDiff`]
///
/// Used for backup change descriptions and CLI previews. It is
/// informational only and does not affect the structured diff.
pub fn render_human_summary(diff: &ComponentDiff) -> String {
    if diff.is_empty() {
        return "No component changes".to_string();
    }

    let sections = [
        ("Added", &diff.added),
        ("Removed", &diff.removed),
        ("Modified", &diff.modified),
        ("Reordered", &diff.reordered),
    ];

    let mut out = String::new();
    for (label, ids) in sections {
        if ids.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{label} ({}): {}", ids.len(), ids.join(", ")));
    }
    out
}
