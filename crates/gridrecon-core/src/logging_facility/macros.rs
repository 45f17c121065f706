//! Canonical logging macros

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use gridrecon_core::log_op_start;
/// log_op_start!("diff_grid");
/// log_op_start!("diff_grid", row_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = gridrecon_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = gridrecon_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use gridrecon_core::log_op_end;
/// log_op_end!("diff_grid", duration_ms = 3);
/// log_op_end!("diff_grid", duration_ms = 3, row_count = 10);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = gridrecon_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = gridrecon_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into a
/// [`ValidationError`](crate::errors::ValidationError).
///
/// # Example
///
/// ```
/// # use gridrecon_core::{log_op_error, errors::ReconError};
/// let err = ReconError::PrimaryKeyRequired;
/// log_op_error!("membership_diff_grid", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ValidationError;
        let v_err: ValidationError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = gridrecon_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?v_err.kind(),
            err_code = v_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ValidationError;
        let v_err: ValidationError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = gridrecon_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?v_err.kind(),
            err_code = v_err.code(),
            $($field)*
        );
    }};
}
