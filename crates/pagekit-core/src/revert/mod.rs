//! Revert planning.
//!
//! Works out everything a revert does (target resolution, comparison,
//! optional backup version, the reverted page) without touching storage.
//! `pagekit-engine` persists the plan as one unit.

pub mod model;
pub mod planner;

pub use model::{PageSummary, RevertOptions, RevertPlan, RevertResult, VersionRef};
pub use planner::{backup_name, plan_revert};
