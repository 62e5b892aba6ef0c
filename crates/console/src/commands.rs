//! Runs one console command.

use common::FilterSet;
use domain::{Collection, MutationRequest};
use list_sync::{
    CategoryLoader, EntityListSynchronizer, MutationOutcome, PreferencesForm, ReportGenerator,
    SyncConfig, render_model_for,
};
use serde_json::{Map, Value, json};
use transport::Transport;
use views::{NotificationFeed, Preferences};

use crate::cli::{Command, PreferencesCommand};
use crate::terminal::{Output, PromptConfirmer, TerminalNotifier, TerminalSurface};
use crate::{ConsoleError, Result};

type TerminalSynchronizer<T> =
    EntityListSynchronizer<T, TerminalSurface, TerminalNotifier, PromptConfirmer>;

/// Runs commands against a library server.
///
/// Each command builds the synchronizer or loader it needs, so no state is
/// carried from one command to the next.
pub struct Console<T: Transport + Clone> {
    transport: T,
    config: SyncConfig,
    out: Output,
    confirmer: PromptConfirmer,
}

impl<T: Transport + Clone> Console<T> {
    pub fn new(transport: T, config: SyncConfig, out: Output) -> Self {
        Self {
            transport,
            config,
            out,
            confirmer: PromptConfirmer::new(false),
        }
    }

    /// Skips every confirmation prompt.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.confirmer = PromptConfirmer::new(yes);
        self
    }

    fn notifier(&self) -> TerminalNotifier {
        TerminalNotifier::new(self.out.clone())
    }

    fn synchronizer(&self, collection: Collection) -> Result<TerminalSynchronizer<T>> {
        let model = render_model_for(&collection)
            .ok_or_else(|| ConsoleError::UnknownCollection(collection.name.to_string()))?;
        let surface = TerminalSurface::new(model.columns(), self.out.clone());
        Ok(EntityListSynchronizer::new(
            collection,
            model,
            self.config.clone(),
            self.transport.clone(),
            surface,
            self.notifier(),
            self.confirmer,
        ))
    }

    fn collection(name: &str) -> Result<Collection> {
        Collection::from_name(name).ok_or_else(|| ConsoleError::UnknownCollection(name.to_string()))
    }

    fn mutable_collection(name: &str) -> Result<Collection> {
        let collection = Self::collection(name)?;
        if !collection.mutable {
            return Err(ConsoleError::ReadOnlyCollection(name.to_string()));
        }
        Ok(collection)
    }

    /// Builds a partial update from the fields that were given.
    fn update_request(
        collection: Collection,
        id: String,
        fields: Vec<(&str, Option<Value>)>,
    ) -> Result<MutationRequest> {
        let payload: Map<String, Value> = fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
            .collect();
        if payload.is_empty() {
            return Err(ConsoleError::EmptyUpdate(format!("{} {id}", collection.singular)));
        }
        Ok(MutationRequest::update(&collection, id, Value::Object(payload)))
    }

    /// Runs `command`. Returns `Ok(false)` when the server side failed; the
    /// failure has already been printed.
    #[tracing::instrument(skip_all)]
    pub async fn run(&self, command: Command) -> Result<bool> {
        let filters = command.filters();
        match command {
            Command::List { collection, .. } => {
                self.list(Self::collection(&collection)?, filters).await
            }
            Command::Search { .. } => self.list(Collection::book_search(), filters).await,
            Command::Categories => self.categories().await,
            Command::Notifications => self.notifications().await,
            Command::MarkRead { id } => {
                self.submit(
                    Collection::notifications(),
                    MutationRequest::mark_notification_read(id),
                )
                .await
            }
            Command::Delete { collection, id } => {
                let collection = Self::mutable_collection(&collection)?;
                self.submit(collection, MutationRequest::delete(&collection, id))
                    .await
            }
            Command::PayFine { id } => {
                self.submit(Collection::fines(), MutationRequest::pay_fine(id))
                    .await
            }
            Command::Borrow { book_id } => {
                self.submit(Collection::books(), MutationRequest::borrow_book(book_id))
                    .await
            }
            Command::Return { borrowing_id } => {
                self.submit(
                    Collection::borrowings(),
                    MutationRequest::return_borrowing(borrowing_id),
                )
                .await
            }
            Command::AddBook {
                title,
                author,
                isbn,
                category,
                description,
            } => {
                let payload = json!({
                    "title": title,
                    "author": author,
                    "isbn": isbn,
                    "category_id": category.unwrap_or_default(),
                    "description": description.unwrap_or_default(),
                });
                self.submit(
                    Collection::books(),
                    MutationRequest::create(&Collection::books(), payload),
                )
                .await
            }
            Command::AddUser {
                username,
                email,
                password,
                full_name,
                role,
            } => {
                let payload = json!({
                    "username": username,
                    "email": email,
                    "password": password,
                    "full_name": full_name.unwrap_or_default(),
                    "role": role.unwrap_or_default(),
                });
                self.submit(
                    Collection::users(),
                    MutationRequest::create(&Collection::users(), payload),
                )
                .await
            }
            Command::EditBook {
                id,
                title,
                author,
                isbn,
                category,
                publication_year,
                total_copies,
            } => {
                let request = Self::update_request(
                    Collection::books(),
                    id,
                    vec![
                        ("title", title.map(Value::from)),
                        ("author", author.map(Value::from)),
                        ("isbn", isbn.map(Value::from)),
                        ("category_id", category.map(Value::from)),
                        ("publication_year", publication_year.map(Value::from)),
                        ("total_copies", total_copies.map(Value::from)),
                    ],
                )?;
                self.submit(Collection::books(), request).await
            }
            Command::EditUser {
                id,
                username,
                email,
                full_name,
                role,
                active,
            } => {
                let request = Self::update_request(
                    Collection::users(),
                    id,
                    vec![
                        ("username", username.map(Value::from)),
                        ("email", email.map(Value::from)),
                        ("full_name", full_name.map(Value::from)),
                        ("role", role.map(Value::from)),
                        ("is_active", active.map(Value::from)),
                    ],
                )?;
                self.submit(Collection::users(), request).await
            }
            Command::Report {
                report_type,
                start,
                end,
            } => {
                self.report(
                    &report_type,
                    start.as_deref().unwrap_or_default(),
                    end.as_deref().unwrap_or_default(),
                )
                .await
            }
            Command::Preferences { action } => self.preferences(action).await,
        }
    }

    async fn list(&self, collection: Collection, filters: FilterSet) -> Result<bool> {
        let mut sync = self.synchronizer(collection)?;
        Ok(sync.reload(filters).await.is_success())
    }

    /// Confirms and sends `request`; on success the refreshed list of
    /// `collection` is printed.
    async fn submit(&self, collection: Collection, request: MutationRequest) -> Result<bool> {
        let mut sync = self.synchronizer(collection)?;
        Ok(match sync.submit(request).await {
            MutationOutcome::Applied { .. } => true,
            MutationOutcome::Cancelled => {
                self.out.line("Cancelled.");
                true
            }
            MutationOutcome::Rejected { .. } | MutationOutcome::Failed { .. } => false,
        })
    }

    async fn notifications(&self) -> Result<bool> {
        let mut sync = self.synchronizer(Collection::notifications())?;
        if !sync.reload(FilterSet::new()).await.is_success() {
            return Ok(false);
        }
        let feed = NotificationFeed::from_entities(sync.snapshot().entities());
        self.out.line(&format!("{} unread", feed.unread_count));
        Ok(true)
    }

    async fn categories(&self) -> Result<bool> {
        let loader = CategoryLoader::new(self.config.clone(), self.transport.clone(), self.notifier());
        let Some(options) = loader.load().await else {
            return Ok(false);
        };
        for (value, label) in options.options().iter().skip(1) {
            self.out.line(&format!("{value}  {label}"));
        }
        Ok(true)
    }

    async fn report(&self, report_type: &str, start: &str, end: &str) -> Result<bool> {
        let generator =
            ReportGenerator::new(self.config.clone(), self.transport.clone(), self.notifier());
        let Some(table) = generator.generate(report_type, start, end).await else {
            return Ok(false);
        };

        if table.is_empty() {
            self.out.line(table.empty_message());
            return Ok(true);
        }
        self.out.line(&table.headers.join("\t"));
        for row in &table.rows {
            self.out.line(&row.join("\t"));
        }
        Ok(true)
    }

    async fn preferences(&self, action: PreferencesCommand) -> Result<bool> {
        let form = PreferencesForm::new(self.config.clone(), self.transport.clone(), self.notifier());
        let Some(current) = form.load().await else {
            return Ok(false);
        };

        match action {
            PreferencesCommand::Show => {
                self.print_preferences(&current);
                Ok(true)
            }
            PreferencesCommand::Set {
                theme,
                language,
                email_notifications,
                sms_notifications,
                timezone,
            } => {
                let updated = Preferences {
                    theme: theme.unwrap_or(current.theme),
                    language: language.unwrap_or(current.language),
                    email_notifications: email_notifications
                        .unwrap_or(current.email_notifications),
                    sms_notifications: sms_notifications.unwrap_or(current.sms_notifications),
                    timezone: timezone.unwrap_or(current.timezone),
                };
                Ok(form.save(&updated).await.is_applied())
            }
        }
    }

    fn print_preferences(&self, preferences: &Preferences) {
        self.out.line(&format!("theme: {}", preferences.theme));
        self.out.line(&format!("language: {}", preferences.language));
        self.out.line(&format!(
            "email_notifications: {}",
            preferences.email_notifications
        ));
        self.out.line(&format!(
            "sms_notifications: {}",
            preferences.sms_notifications
        ));
        self.out.line(&format!("timezone: {}", preferences.timezone));
    }
}
