//! The display a synchronizer renders into.

use std::sync::{Arc, PoisonError, RwLock};

use views::TableBody;

/// Where rendered rows end up.
pub trait ListSurface: Send + Sync {
    /// Replaces the displayed rows with `body`.
    fn render(&self, body: &TableBody);

    /// Closes any open create/edit form. Called after a successful mutation.
    fn close_editor(&self) {}
}

impl<S: ListSurface + ?Sized> ListSurface for Arc<S> {
    fn render(&self, body: &TableBody) {
        (**self).render(body)
    }

    fn close_editor(&self) {
        (**self).close_editor()
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    renders: Vec<TableBody>,
    editor_closed: usize,
}

/// A surface that records what it was asked to show, for testing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered body.
    pub fn current(&self) -> Option<TableBody> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .renders
            .last()
            .cloned()
    }

    /// Number of times rows were rendered.
    pub fn render_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .renders
            .len()
    }

    /// Number of times the editor was closed.
    pub fn editor_closed_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .editor_closed
    }
}

impl ListSurface for RecordingSurface {
    fn render(&self, body: &TableBody) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .renders
            .push(body.clone());
    }

    fn close_editor(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .editor_closed += 1;
    }
}
