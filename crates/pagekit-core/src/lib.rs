//! pagekit core - in-memory page-building kernel
//!
//! This crate provides the domain model and pure operations for pagekit:
//! - The closed component variant model (text, banner, card, accordion,
//!   link group, plus reserved kinds) and rich-text payloads
//! - Validation rules and page-level invariant audits
//! - The Page aggregate with atomic component operations and `apply()`
//! - PageVersion snapshots with per-page version numbering
//! - Structural diff and the revert planner
//!
//! Nothing here performs I/O. Persistence lives in `pagekit-store`, and
//! locking and orchestration in `pagekit-engine`.

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod revert;
pub mod rules;
pub mod snapshot;

// Macros resolve schema constants through this path.
#[doc(hidden)]
pub use pagekit_core_types as core_types;

// Re-export commonly used types
pub use apply::apply;
pub use commands::Command;
pub use diff::{ComparisonMode, ComponentDiff};
pub use errors::{FieldViolation, PageKitError, PkError, PkErrorKind, Result};
pub use model::{
    Component, ComponentKind, ComponentPayload, Page, PageTemplate, PageVersion, RichText,
    RichTextFormat,
};
pub use ops::ComponentPatch;
pub use revert::{RevertOptions, RevertResult};
pub use snapshot::SnapshotRequest;
