use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strictly two component collections are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Full deep equality, rich-text timestamps included
    Strict,
    /// Deep equality except rich-text `createdAt` / `lastModifiedAt`
    #[default]
    IgnoreContentTimestamps,
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ComparisonMode::Strict),
            "content" | "ignore_content_timestamps" => Ok(ComparisonMode::IgnoreContentTimestamps),
            other => Err(format!(
                "unknown comparison mode '{other}' (expected 'strict' or 'content')"
            )),
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::Strict => f.write_str("strict"),
            ComparisonMode::IgnoreContentTimestamps => f.write_str("content"),
        }
    }
}

/// What changes when going from one component collection to another
///
/// All lists hold component ids. Empty lists mean no change of that sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDiff {
    /// Present in the target only
    pub added: Vec<String>,
    /// Present in the current collection only
    pub removed: Vec<String>,
    /// Present in both with a different payload
    pub modified: Vec<String>,
    /// Present in both with a different order
    pub reordered: Vec<String>,
}

impl ComponentDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.modified.is_empty()
            && self.reordered.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len() + self.reordered.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_mode_parse() {
        assert_eq!("strict".parse(), Ok(ComparisonMode::Strict));
        assert_eq!(
            " Content ".parse(),
            Ok(ComparisonMode::IgnoreContentTimestamps)
        );
        assert!("loose".parse::<ComparisonMode>().is_err());
        assert_eq!(
            ComparisonMode::default(),
            ComparisonMode::IgnoreContentTimestamps
        );
    }
}
