//! State-changing requests against a collection.

use common::EntityId;
use serde_json::{Value, json};
use transport::{ApiRequest, Method};

use crate::Collection;
use crate::collection::capitalize;

/// What a mutation does to its collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    /// A domain action such as `pay`, `return` or `read`.
    Action(String),
}

/// One state-changing operation, built from the current UI state, sent
/// once and discarded after its response has been handled.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    pub kind: MutationKind,
    pub method: Method,
    pub path: String,

    /// Entity the mutation targets; `None` for creates.
    pub target: Option<EntityId>,

    pub payload: Option<Value>,

    /// Gerund phrase for failure text: "Error <label>. Please try again."
    pub label: String,

    /// Text shown on success. `None` falls back to the server's `message`.
    pub success_message: Option<String>,

    /// Whether a success banner is shown at all.
    pub announce_success: bool,

    /// Prompt the user must accept before the request is sent.
    pub confirmation: Option<String>,
}

impl MutationRequest {
    fn new(kind: MutationKind, method: Method, path: String, label: String) -> Self {
        Self {
            kind,
            method,
            path,
            target: None,
            payload: None,
            label,
            success_message: None,
            announce_success: true,
            confirmation: None,
        }
    }

    /// `POST /api/<collection>` with the new record's fields.
    pub fn create(collection: &Collection, payload: Value) -> Self {
        let mut request = Self::new(
            MutationKind::Create,
            Method::Post,
            collection.path.to_string(),
            format!("saving {}", collection.singular),
        );
        request.payload = Some(payload);
        request.success_message =
            Some(format!("{} added successfully!", collection.title_singular()));
        request
    }

    /// `PUT /api/<collection>/<id>` with the changed fields.
    pub fn update(collection: &Collection, id: impl Into<EntityId>, payload: Value) -> Self {
        let id = id.into();
        let mut request = Self::new(
            MutationKind::Update,
            Method::Put,
            collection.item_path(&id),
            format!("updating {}", collection.singular),
        );
        request.target = Some(id);
        request.payload = Some(payload);
        request.success_message = Some(format!(
            "{} updated successfully!",
            collection.title_singular()
        ));
        request
    }

    /// `DELETE /api/<collection>/<id>`, gated behind a confirmation prompt.
    pub fn delete(collection: &Collection, id: impl Into<EntityId>) -> Self {
        let id = id.into();
        let mut request = Self::new(
            MutationKind::Delete,
            Method::Delete,
            collection.item_path(&id),
            format!("deleting {}", collection.singular),
        );
        request.target = Some(id);
        request.success_message = Some(format!(
            "{} deleted successfully!",
            collection.title_singular()
        ));
        request.confirmation = Some(format!(
            "Are you sure you want to delete this {}?",
            collection.singular
        ));
        request
    }

    /// `POST /api/<collection>/<id>/<action>`.
    pub fn action(collection: &Collection, id: impl Into<EntityId>, action: &str) -> Self {
        let id = id.into();
        let mut request = Self::new(
            MutationKind::Action(action.to_string()),
            Method::Post,
            collection.action_path(&id, action),
            format!("performing '{action}' on {}", collection.singular),
        );
        request.target = Some(id);
        request
    }

    /// `PUT <path>` replacing a singleton document, such as the preferences.
    pub fn replace(path: impl Into<String>, payload: Value, label: impl Into<String>) -> Self {
        let mut request = Self::new(MutationKind::Update, Method::Put, path.into(), label.into());
        request.payload = Some(payload);
        request
    }

    /// Marks a fine as paid.
    pub fn pay_fine(id: impl Into<EntityId>) -> Self {
        Self::action(&Collection::fines(), id, "pay")
            .with_label("paying fine")
            .with_success_message("Fine marked as paid successfully!")
            .with_confirmation("Are you sure you want to mark this fine as paid?")
    }

    /// Returns a borrowed book. Success text comes from the server.
    pub fn return_borrowing(id: impl Into<EntityId>) -> Self {
        Self::action(&Collection::borrowings(), id, "return")
            .with_label("returning book")
            .with_confirmation("Do you want to return this book?")
    }

    /// Borrows a book: a create on the borrowings collection, usually issued
    /// from the books view. Success text comes from the server.
    pub fn borrow_book(book_id: impl Into<EntityId>) -> Self {
        let book_id = book_id.into();
        let payload = json!({ "book_id": book_id });
        let mut request = Self::new(
            MutationKind::Create,
            Method::Post,
            Collection::borrowings().path.to_string(),
            "borrowing book".to_string(),
        );
        request.target = Some(book_id);
        request.payload = Some(payload);
        request.confirmation = Some("Do you want to borrow this book?".to_string());
        request
    }

    /// Marks a notification as read, without a success banner.
    pub fn mark_notification_read(id: impl Into<EntityId>) -> Self {
        Self::action(&Collection::notifications(), id, "read")
            .with_label("marking notification as read")
            .silent()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn with_confirmation(mut self, prompt: impl Into<String>) -> Self {
        self.confirmation = Some(prompt.into());
        self
    }

    /// Drops the confirmation prompt (e.g. when the caller already asked).
    pub fn without_confirmation(mut self) -> Self {
        self.confirmation = None;
        self
    }

    /// Suppresses the success banner.
    pub fn silent(mut self) -> Self {
        self.announce_success = false;
        self
    }

    /// Returns true if the request needs explicit user approval.
    pub fn requires_confirmation(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Generic text for a transport failure.
    pub fn transport_failure_message(&self) -> String {
        format!("Error {}. Please try again.", self.label)
    }

    /// Fallback text for an application failure without a message.
    pub fn application_failure_message(&self) -> String {
        capitalize(&format!("error {}", self.label))
    }

    /// Fallback text for a success response without a message.
    pub fn default_success_message(&self) -> String {
        format!("{} completed successfully.", capitalize(&self.label))
    }

    /// Converts the mutation into a wire request carrying the credential.
    pub fn to_api_request(&self, credential: Option<&str>) -> ApiRequest {
        let mut request = ApiRequest::new(self.method, self.path.clone())
            .with_api_key(credential.map(str::to_string));
        if let Some(ref payload) = self.payload {
            request = request.with_json(payload.clone());
        }
        request
    }
}
