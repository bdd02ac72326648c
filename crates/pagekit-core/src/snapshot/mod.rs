//! PageVersion snapshot domain logic.
//!
//! ## Responsibilities
//!
//! - Assign per-page version numbers (`max + 1`, starting at 1)
//! - Deep-copy a page's live components into a new immutable version
//! - Order and scope version lookups to their owning page
//!
//! ## Non-Responsibilities
//!
//! - Persistence (handled by `pagekit-store`)
//! - Serializing concurrent snapshot requests (handled by `pagekit-engine`)

pub mod versioning;

pub use versioning::{
    create_snapshot, find_version, list_versions, next_version_number, SnapshotRequest,
};
