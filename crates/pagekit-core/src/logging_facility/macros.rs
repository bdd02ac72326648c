//! Canonical lifecycle logging macros
//!
//! Field names come from `pagekit_core_types::schema` so every operation
//! logs the same shape.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use pagekit_core::log_op_start;
/// log_op_start!("revert");
/// log_op_start!("revert", page_id = "p1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use pagekit_core::log_op_end;
/// log_op_end!("revert", duration_ms = 3);
/// log_op_end!("revert", duration_ms = 3, page_id = "p1");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation
///
/// `$err` is borrowed and cloned into a `PkError`, so the caller can still
/// return it afterwards.
///
/// # Example
///
/// ```
/// # use pagekit_core::{log_op_error, errors::PageKitError};
/// let err = PageKitError::PageNotFound { page_id: "p1".to_string() };
/// log_op_error!("revert", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let pk_err: $crate::errors::PkError = ::core::clone::Clone::clone(&$err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?pk_err.kind(),
            err.code = pk_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let pk_err: $crate::errors::PkError = ::core::clone::Clone::clone(&$err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?pk_err.kind(),
            err.code = pk_err.code(),
            $($field)*
        );
    }};
}
