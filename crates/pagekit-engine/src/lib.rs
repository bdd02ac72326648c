//! pagekit engine - orchestration layer
//!
//! Coordinates the pure core with a `PageRepository`:
//! - Serializes mutations per page through a lock registry
//! - Exposes the component, version and revert surfaces
//! - Owns lifecycle logging for every caller-facing operation

pub mod commands;
pub mod config;
pub mod engine;
pub mod locks;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use config::EngineConfig;
pub use engine::PageEngine;
