//! Confirmation of destructive operations.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

/// Asks the user to approve an operation.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Shows `prompt` and returns true if the user accepted.
    async fn confirm(&self, prompt: &str) -> bool;
}

#[async_trait]
impl<C: Confirmer + ?Sized> Confirmer for Arc<C> {
    async fn confirm(&self, prompt: &str) -> bool {
        (**self).confirm(prompt).await
    }
}

/// Accepts every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirmer for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

#[async_trait]
impl Confirmer for NeverConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct ScriptedState {
    answers: VecDeque<bool>,
    prompts: Vec<String>,
}

/// Answers prompts from a script and records them, for testing.
///
/// Prompts beyond the end of the script are declined.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirmer {
    state: Arc<RwLock<ScriptedState>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ScriptedState {
                answers: answers.into_iter().collect(),
                prompts: Vec::new(),
            })),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .prompts
            .clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.prompts.push(prompt.to_string());
        state.answers.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_answers_in_order() {
        let confirmer = ScriptedConfirmer::new([true, false]);
        assert!(confirmer.confirm("first?").await);
        assert!(!confirmer.confirm("second?").await);
        assert!(!confirmer.confirm("third?").await);
        assert_eq!(confirmer.prompts(), vec!["first?", "second?", "third?"]);
    }

    #[tokio::test]
    async fn fixed_answers() {
        assert!(AlwaysConfirm.confirm("sure?").await);
        assert!(!NeverConfirm.confirm("sure?").await);
    }
}
