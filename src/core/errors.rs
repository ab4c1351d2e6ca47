/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::TaskId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(scheduler::invalid_argument),
        help("Tick durations must be finite and non-negative.")
    )]
    InvalidArgument(String),

    #[error("Task {0} not found in scheduler")]
    #[diagnostic(
        code(scheduler::task_not_found),
        help("The task id was never issued by this scheduler. Check the board for valid ids.")
    )]
    NotFound(TaskId),

    #[error("No ready or running task named '{0}'")]
    #[diagnostic(
        code(scheduler::task_name_not_found),
        help("Names match exactly. Halted tasks and the rest task cannot be completed by name.")
    )]
    NameNotFound(String),

    #[error("Task {0} is already halted")]
    #[diagnostic(
        code(scheduler::already_halted),
        help("Completed tasks are terminal and cannot be completed twice.")
    )]
    AlreadyHalted(TaskId),

    #[error("Invalid operation: {0}")]
    #[diagnostic(
        code(scheduler::invalid_operation),
        help("The rest task cycles with the others and cannot be completed.")
    )]
    InvalidOperation(String),
}

/// Unified application error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum AppError {
    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(interleave::io_error),
        help("Reading or writing the task list failed. Check the path and file permissions.")
    )]
    Io(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(interleave::configuration_error),
        help("Invalid configuration. Review the INTERLEAVE_* environment variables.")
    )]
    Configuration(String),
}

// Implement conversion from std::io::Error
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Serializable error representation for driver reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SerializableError {
    /// Create a new serializable error
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a new serializable error with details
    pub fn with_details(
        error_type: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl From<SchedulerError> for SerializableError {
    fn from(err: SchedulerError) -> Self {
        let error_type = match &err {
            SchedulerError::InvalidArgument(_) => "invalid_argument",
            SchedulerError::NotFound(_) | SchedulerError::NameNotFound(_) => "not_found",
            SchedulerError::AlreadyHalted(_) => "already_halted",
            SchedulerError::InvalidOperation(_) => "invalid_operation",
        };
        SerializableError::new(error_type, err.to_string())
    }
}

impl From<AppError> for SerializableError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Scheduler(inner) => inner.into(),
            AppError::Io(msg) => SerializableError::with_details("io_error", "I/O error", msg),
            AppError::Configuration(msg) => {
                SerializableError::with_details("configuration_error", "Configuration error", msg)
            }
        }
    }
}

/// Result type for scheduler operations
pub type SchedulerResult<T> = std::result::Result<T, SchedulerError>;

/// Result type for application operations (loader, config, driver)
pub type Result<T> = std::result::Result<T, AppError>;
