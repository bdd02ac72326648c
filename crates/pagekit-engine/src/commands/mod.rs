//! Caller-facing surfaces of the engine
//!
//! Each module adds an `impl PageEngine` block:
//! - `page`: create and read pages
//! - `component`: component CRUD and nested collection edits
//! - `version`: snapshot, list and read versions
//! - `revert`: revert with backup and rollback
//!
//! `engine_command` wraps all of them in one dispatchable enum.

pub mod component;
pub mod engine_command;
pub mod page;
pub mod revert;
pub mod version;
