//! View state machine.

/// The state of a list view.
///
/// State transitions:
/// ```text
/// Idle ──► Loading ──┬──► Rendered ──► Loading
///                    └──► Error ─────► Loading (retry)
/// ```
/// There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A read is in flight.
    Loading,

    /// The last read succeeded and its rows are shown.
    Rendered,

    /// The last read failed; the previous rows are still shown.
    Error,
}

impl ViewState {
    /// Returns true if rows from a successful read are on screen.
    pub fn has_rows(&self) -> bool {
        matches!(self, ViewState::Rendered)
    }

    /// Returns true if a read is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Idle => "Idle",
            ViewState::Loading => "Loading",
            ViewState::Rendered => "Rendered",
            ViewState::Error => "Error",
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
