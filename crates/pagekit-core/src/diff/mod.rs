//! Component collection diff.
//!
//! Compares a page's live components against a stored version and reports
//! what a revert would change. Also decides whether two collections are
//! equal for backup purposes.
//!
//! ## Guarantees
//!
//! - **Determinism**: id lists follow display order of the side they come from.
//! - **Timestamp noise**: under `ComparisonMode::IgnoreContentTimestamps`, rich-text
//!   `createdAt`/`lastModifiedAt` never count as a change.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{components_equal, diff_components};
pub use human_summary::render_human_summary;
pub use model::{ComparisonMode, ComponentDiff};
