//! View error types.

use thiserror::Error;

/// Errors that can occur while configuring views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A capability name that no view understands.
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
