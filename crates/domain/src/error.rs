//! Domain error types.

use common::EntityId;
use thiserror::Error;
use transport::TransportError;

/// Errors that can occur while interpreting API responses.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The exchange itself failed or the body was not JSON.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a failure marker.
    #[error("Application error: {}", message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },

    /// A record lacks its identifier field.
    #[error("Record {index} is missing identifier field '{field}'")]
    MissingIdentifier { field: &'static str, index: usize },

    /// Two records share an identifier.
    #[error("Duplicate identifier in collection: {0}")]
    DuplicateIdentifier(EntityId),

    /// The JSON document does not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl DomainError {
    /// Returns true if the server reported the failure itself.
    pub fn is_application(&self) -> bool {
        matches!(self, DomainError::Application { .. })
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
