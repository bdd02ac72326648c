//! Structured logging facility for pagekit
//!
//! - One initialization point, `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`) that
//!   emit the canonical fields from `pagekit_core_types::schema`
//! - An in-memory capture layer for assertions in tests
//!
//! Lifecycle events belong to the engine. Core and store code only emit
//! `tracing::debug!` detail.
//!
//! # Usage
//!
//! ```rust
//! use pagekit_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
