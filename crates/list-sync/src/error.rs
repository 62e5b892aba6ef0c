//! Synchronizer error types.

use domain::DomainError;
use thiserror::Error;
use transport::TransportError;

/// How a failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, error status or malformed body: generic text.
    Transport,
    /// The server reported a failure: its message is shown verbatim.
    Application,
}

/// Errors that can occur while synchronizing a list.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Request or response handling failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SyncError {
    /// Classifies the failure for user-facing text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Domain(e) if e.is_application() => ErrorKind::Application,
            SyncError::Domain(_) => ErrorKind::Transport,
        }
    }

    /// The server's own failure message, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SyncError::Domain(DomainError::Application { message }) => message.as_deref(),
            SyncError::Domain(_) => None,
        }
    }

    /// Text shown to the user.
    ///
    /// Application failures show the server message, or
    /// `application_fallback` without one; everything else shows
    /// `transport_text`.
    pub fn user_message(&self, transport_text: String, application_fallback: String) -> String {
        match self.kind() {
            ErrorKind::Application => self
                .server_message()
                .map(str::to_string)
                .unwrap_or(application_fallback),
            ErrorKind::Transport => transport_text,
        }
    }
}

impl From<TransportError> for SyncError {
    fn from(error: TransportError) -> Self {
        SyncError::Domain(error.into())
    }
}

/// Convenience type alias for synchronizer results.
pub type Result<T> = std::result::Result<T, SyncError>;
