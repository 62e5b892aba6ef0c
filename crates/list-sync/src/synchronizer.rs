//! The list synchronizer.

use std::sync::Arc;

use common::FilterSet;
use domain::{Collection, CollectionSnapshot, MutationRequest};
use transport::Transport;
use views::{RenderModel, RowModel, TableBody};

use crate::confirm::Confirmer;
use crate::dispatch;
use crate::notify::{Notification, Notifier};
use crate::outcome::{MutationOutcome, ReloadOutcome};
use crate::surface::ListSurface;
use crate::{SyncConfig, ViewState};

/// Keeps one rendered list view consistent with the server.
///
/// Every successful read replaces the snapshot wholesale and re-renders all
/// rows. Every successful mutation is followed by a reload with the filters
/// that were active when it started. Operations take `&mut self`, so at most
/// one request is in flight per view.
pub struct EntityListSynchronizer<T, S, N, C>
where
    T: Transport,
    S: ListSurface,
    N: Notifier,
    C: Confirmer,
{
    transport: T,
    surface: S,
    notifier: N,
    confirmer: C,
    config: SyncConfig,
    collection: Collection,
    model: Arc<dyn RenderModel>,
    snapshot: CollectionSnapshot,
    active_filters: FilterSet,
    state: ViewState,
    body: Option<TableBody>,
}

impl<T, S, N, C> EntityListSynchronizer<T, S, N, C>
where
    T: Transport,
    S: ListSurface,
    N: Notifier,
    C: Confirmer,
{
    /// Creates a synchronizer for `collection`, rendering through `model`.
    ///
    /// Nothing is fetched until the first [`reload`](Self::reload).
    pub fn new(
        collection: Collection,
        model: Arc<dyn RenderModel>,
        config: SyncConfig,
        transport: T,
        surface: S,
        notifier: N,
        confirmer: C,
    ) -> Self {
        Self {
            transport,
            surface,
            notifier,
            confirmer,
            config,
            collection,
            model,
            snapshot: CollectionSnapshot::empty(),
            active_filters: FilterSet::new(),
            state: ViewState::Idle,
            body: None,
        }
    }

    /// Fetches the collection with `filters` and re-renders the view.
    ///
    /// On failure the previous rows stay on screen and a notification is
    /// shown. There is no retry.
    #[tracing::instrument(skip(self, filters), fields(collection = self.collection.name))]
    pub async fn reload(&mut self, filters: FilterSet) -> ReloadOutcome {
        metrics::counter!("list_sync_reloads_total", "collection" => self.collection.name)
            .increment(1);

        self.active_filters = filters;
        self.state = ViewState::Loading;

        let result =
            dispatch::read_collection(&self.transport, &self.collection, &self.active_filters)
                .await;

        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                let body = self
                    .model
                    .render(self.snapshot.entities(), &self.config.capabilities);
                self.surface.render(&body);
                self.body = Some(body);
                self.state = ViewState::Rendered;

                tracing::debug!(rows = self.snapshot.len(), "collection rendered");
                if self.snapshot.is_empty() {
                    ReloadOutcome::Empty
                } else {
                    ReloadOutcome::Rendered {
                        rows: self.snapshot.len(),
                    }
                }
            }
            Err(error) => {
                metrics::counter!(
                    "list_sync_reload_failures_total",
                    "collection" => self.collection.name
                )
                .increment(1);

                let generic = format!("Error loading {}. Please try again.", self.collection.plural);
                let message = error.user_message(generic.clone(), generic);
                tracing::warn!(error = %error, "reload failed");
                self.notifier
                    .notify(Notification::error(message.clone(), self.config.notification_ttl));
                self.state = ViewState::Error;

                ReloadOutcome::Failed { error, message }
            }
        }
    }

    /// Reloads with the filters already active.
    pub async fn retry(&mut self) -> ReloadOutcome {
        let filters = self.active_filters.clone();
        self.reload(filters).await
    }

    /// Sends `request` once, without asking for confirmation.
    ///
    /// On success the list is reloaded with the filters active when the
    /// mutation started, the editor is closed and only then is the success
    /// message shown. On failure nothing is reloaded.
    #[tracing::instrument(
        skip(self, request),
        fields(collection = self.collection.name, method = %request.method, path = %request.path)
    )]
    pub async fn mutate(&mut self, request: MutationRequest) -> MutationOutcome {
        metrics::counter!("list_sync_mutations_total", "collection" => self.collection.name)
            .increment(1);

        let filters = self.active_filters.clone();
        let result = dispatch::send_mutation(
            &self.transport,
            &request,
            self.config.credential.as_deref(),
        )
        .await;

        match result {
            Ok(reply) => {
                tracing::info!("mutation applied");
                let reload = self.reload(filters).await;
                self.surface.close_editor();

                let message = dispatch::success_message(&request, reply);
                if let Some(ref message) = message {
                    self.notifier.notify(Notification::success(
                        message.clone(),
                        self.config.notification_ttl,
                    ));
                }

                MutationOutcome::Applied {
                    message,
                    reload: Some(reload),
                }
            }
            Err(error) => {
                metrics::counter!(
                    "list_sync_mutation_failures_total",
                    "collection" => self.collection.name
                )
                .increment(1);
                dispatch::mutation_failure(
                    &self.notifier,
                    self.config.notification_ttl,
                    &request,
                    error,
                )
            }
        }
    }

    /// Asks the confirmer about `request`'s prompt.
    ///
    /// Requests without a prompt are approved without asking.
    pub async fn confirm_destructive(&self, request: &MutationRequest) -> bool {
        match request.confirmation {
            Some(ref prompt) => self.confirmer.confirm(prompt).await,
            None => true,
        }
    }

    /// Confirms `request` if it carries a prompt, then mutates.
    pub async fn submit(&mut self, request: MutationRequest) -> MutationOutcome {
        if !self.confirm_destructive(&request).await {
            tracing::debug!(path = %request.path, "mutation cancelled");
            return MutationOutcome::Cancelled;
        }
        self.mutate(request).await
    }

    /// The most recent successful read.
    pub fn snapshot(&self) -> &CollectionSnapshot {
        &self.snapshot
    }

    /// The filters of the most recent reload.
    pub fn active_filters(&self) -> &FilterSet {
        &self.active_filters
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// The rendered body, or `None` before the first successful read.
    pub fn body(&self) -> Option<&TableBody> {
        self.body.as_ref()
    }

    /// The rendered entity rows; empty while a placeholder is shown.
    pub fn rows(&self) -> &[RowModel] {
        self.body.as_ref().map(TableBody::rows).unwrap_or(&[])
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
