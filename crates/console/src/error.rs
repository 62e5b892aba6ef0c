//! Console error types.

use thiserror::Error;
use transport::TransportError;
use views::ViewError;

/// Errors that stop a command before any request is sent.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The named collection has no list view.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// The named collection is a search or lookup endpoint.
    #[error("Collection is read-only: {0}")]
    ReadOnlyCollection(String),

    /// An edit command named no field to change.
    #[error("Nothing to update for {0}")]
    EmptyUpdate(String),

    /// `LIBRARY_CAPABILITIES` or `--capabilities` named something unknown.
    #[error("Invalid capabilities: {0}")]
    InvalidCapabilities(#[from] ViewError),

    /// A configuration value could not be parsed.
    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    /// The HTTP client could not be built.
    #[error("Transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
