use thiserror::Error;

/// Errors that can occur while resolving employees or serving leave requests.
///
/// `NotFound` and ambiguous lookups are not errors; they are reported through
/// [`crate::types::Resolution`].
#[derive(Error, Debug)]
pub enum LeaveDeskError {
    #[error("directory unavailable: {message} (operation: {operation})")]
    DirectoryUnavailable { message: String, operation: String },

    #[error("ledger error: {message} (operation: {operation})")]
    Ledger { message: String, operation: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("roster error: {message} (path: {path})")]
    Roster { message: String, path: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `LeaveDeskError`.
pub type Result<T> = std::result::Result<T, LeaveDeskError>;
