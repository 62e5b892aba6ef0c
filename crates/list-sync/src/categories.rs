//! Category options for the book filters.

use common::FilterSet;
use domain::Collection;
use transport::Transport;
use views::CategoryOptions;

use crate::dispatch;
use crate::notify::{Notification, Notifier};
use crate::SyncConfig;

/// Loads the categories offered by the category filter.
pub struct CategoryLoader<T: Transport, N: Notifier> {
    transport: T,
    notifier: N,
    config: SyncConfig,
}

impl<T: Transport, N: Notifier> CategoryLoader<T, N> {
    pub fn new(config: SyncConfig, transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            config,
        }
    }

    /// Returns `None` after notifying the user if the read failed.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Option<CategoryOptions> {
        let collection = Collection::categories();
        match dispatch::read_collection(&self.transport, &collection, &FilterSet::new()).await {
            Ok(snapshot) => Some(CategoryOptions::from_entities(snapshot.entities())),
            Err(error) => {
                let generic = "Error loading categories. Please try again.".to_string();
                let message = error.user_message(generic.clone(), generic);
                tracing::warn!(error = %error, "loading categories failed");
                self.notifier
                    .notify(Notification::error(message, self.config.notification_ttl));
                None
            }
        }
    }
}
