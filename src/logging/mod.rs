//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - JSON file logging with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use pricebatch::logging::init_logging;
//! use pricebatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(batch_id = "b-1", "Batch loaded");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the result of validating a batch
///
/// # Example
///
/// ```no_run
/// use pricebatch::log_validation_complete;
///
/// log_validation_complete!("Weekly ad", 12, 0);
/// ```
#[macro_export]
macro_rules! log_validation_complete {
    ($batch_name:expr, $line_count:expr, $issue_count:expr) => {
        tracing::info!(
            batch = %$batch_name,
            line_count = $line_count,
            issue_count = $issue_count,
            "Validation completed"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use pricebatch::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("b-1", 42, Duration::from_millis(8));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($batch_id:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            batch_id = %$batch_id,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pricebatch::log_error_with_context;
/// use pricebatch::domain::PriceBatchError;
///
/// let error = PriceBatchError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
