//! Results of synchronizer operations.

use crate::SyncError;

/// What a reload did to the view.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// The snapshot was replaced and `rows` entity rows were rendered.
    Rendered { rows: usize },

    /// The server returned no entities; the placeholder row is shown.
    Empty,

    /// The read failed; the previous rows are still shown.
    Failed { error: SyncError, message: String },
}

impl ReloadOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ReloadOutcome::Failed { .. })
    }

    /// Number of entity rows rendered by this reload.
    pub fn row_count(&self) -> usize {
        match self {
            ReloadOutcome::Rendered { rows } => *rows,
            ReloadOutcome::Empty | ReloadOutcome::Failed { .. } => 0,
        }
    }
}

/// What a mutation did.
#[derive(Debug)]
pub enum MutationOutcome {
    /// The server accepted the mutation.
    ///
    /// `message` is the success text shown, if any. `reload` is the reload
    /// that followed; `None` for mutations that do not refresh a list.
    Applied {
        message: Option<String>,
        reload: Option<ReloadOutcome>,
    },

    /// The server refused the mutation; `message` was shown.
    Rejected { error: SyncError, message: String },

    /// The mutation did not reach the server or its answer was unusable.
    Failed { error: SyncError, message: String },

    /// The user declined the confirmation prompt; nothing was sent.
    Cancelled,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    /// The text shown to the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            MutationOutcome::Applied { message, .. } => message.as_deref(),
            MutationOutcome::Rejected { message, .. } | MutationOutcome::Failed { message, .. } => {
                Some(message)
            }
            MutationOutcome::Cancelled => None,
        }
    }
}
