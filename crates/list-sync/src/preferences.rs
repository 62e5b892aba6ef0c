//! The preferences form.

use domain::MutationRequest;
use transport::{ApiRequest, Transport};
use views::Preferences;

use crate::dispatch;
use crate::notify::{Notification, Notifier};
use crate::{MutationOutcome, SyncConfig};

const PREFERENCES_PATH: &str = "/api/preferences";

/// Loads and saves the current user's preferences.
///
/// Saving does not reload any list.
pub struct PreferencesForm<T: Transport, N: Notifier> {
    transport: T,
    notifier: N,
    config: SyncConfig,
}

impl<T: Transport, N: Notifier> PreferencesForm<T, N> {
    pub fn new(config: SyncConfig, transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            config,
        }
    }

    /// Fetches the preferences, filling gaps with defaults.
    ///
    /// Returns `None` after notifying the user if the read failed.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Option<Preferences> {
        match dispatch::read_document(&self.transport, ApiRequest::get(PREFERENCES_PATH)).await {
            Ok(document) => Some(Preferences::from_document(&document)),
            Err(error) => {
                let generic = "Error loading preferences. Please try again.".to_string();
                let message = error.user_message(generic.clone(), generic);
                tracing::warn!(error = %error, "loading preferences failed");
                self.notifier
                    .notify(Notification::error(message, self.config.notification_ttl));
                None
            }
        }
    }

    /// Replaces the preferences on the server.
    #[tracing::instrument(skip(self, preferences))]
    pub async fn save(&self, preferences: &Preferences) -> MutationOutcome {
        let request =
            MutationRequest::replace(PREFERENCES_PATH, preferences.to_payload(), "saving preferences")
                .with_success_message("Preferences saved successfully!");

        let result = dispatch::send_mutation(
            &self.transport,
            &request,
            self.config.credential.as_deref(),
        )
        .await;

        match result {
            Ok(reply) => {
                let message = dispatch::success_message(&request, reply);
                if let Some(ref message) = message {
                    self.notifier.notify(Notification::success(
                        message.clone(),
                        self.config.notification_ttl,
                    ));
                }
                MutationOutcome::Applied {
                    message,
                    reload: None,
                }
            }
            Err(error) => dispatch::mutation_failure(
                &self.notifier,
                self.config.notification_ttl,
                &request,
                error,
            ),
        }
    }
}
