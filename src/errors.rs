//! Error types for repairdesk
//!
//! Each error type has a corresponding error code for programmatic handling.
//! Denied transitions and out-of-range stage requests are not errors: the
//! first is reported as a request outcome, the second is clamped.

use thiserror::Error;

/// Result type alias for repairdesk operations
pub type Result<T> = std::result::Result<T, ShopError>;

/// Main error type for all repairdesk operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Shop directory not found - no .repairdesk directory above the start path
    #[error("Shop not found: {0}")]
    ShopNotFound(String),

    /// Ticket id does not resolve in the store
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    /// Persisting a permitted stage transition failed
    #[error("Failed to commit stage change for ticket {ticket_id}: {message}")]
    CommitFailed { ticket_id: String, message: String },

    /// Role text that is not CLIENT, STAFF or OWNER
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl ShopError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            ShopError::ShopNotFound(_) => "SHOP_NOT_FOUND",
            ShopError::TicketNotFound(_) => "TICKET_NOT_FOUND",
            ShopError::CommitFailed { .. } => "COMMIT_FAILED",
            ShopError::InvalidRole(_) => "INVALID_ROLE",
            ShopError::InvalidJson(_) => "INVALID_JSON",
            ShopError::FileNotFound(_) => "FILE_NOT_FOUND",
            ShopError::ConfigError(_) => "CONFIG_ERROR",
            ShopError::Io(_) => "IO_ERROR",
            ShopError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Whether the operation may succeed if the user simply tries again.
    ///
    /// Only commit failures qualify; the UI offers a retry affordance for them.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShopError::CommitFailed { .. })
    }

    /// Build a commit failure for a ticket from any displayable cause
    pub fn commit_failed<E: std::fmt::Display>(ticket_id: impl Into<String>, cause: E) -> Self {
        ShopError::CommitFailed {
            ticket_id: ticket_id.into(),
            message: cause.to_string(),
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        ShopError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &ShopError) -> i32 {
    match error {
        ShopError::TicketNotFound(_) | ShopError::ShopNotFound(_) => 2,
        ShopError::CommitFailed { .. } => 75, // EX_TEMPFAIL: retry may succeed
        _ => 1,
    }
}
