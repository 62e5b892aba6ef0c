//! Descriptors for the library API collections.

use common::{EntityId, FilterSet};
use transport::ApiRequest;

/// A remote collection exposed by the library API.
///
/// Endpoints follow `/api/<collection>` for reads and creates,
/// `/api/<collection>/<id>` for updates and deletes, and
/// `/api/<collection>/<id>/<action>` for domain actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Short name, used for logs and metrics labels.
    pub name: &'static str,

    /// Base path of the collection endpoint.
    pub path: &'static str,

    /// Field holding each record's identifier.
    pub id_field: &'static str,

    /// Field holding the records when the server wraps them in an object.
    pub wrapper_key: Option<&'static str>,

    /// Human name of one record ("book").
    pub singular: &'static str,

    /// Human name of several records ("books").
    pub plural: &'static str,

    /// Whether the endpoint accepts creates, updates, deletes and actions.
    /// Search and lookup endpoints are read-only.
    pub mutable: bool,
}

impl Collection {
    pub const fn books() -> Self {
        Self {
            name: "books",
            path: "/api/books",
            id_field: "book_id",
            wrapper_key: Some("books"),
            singular: "book",
            plural: "books",
            mutable: true,
        }
    }

    /// Advanced book search. Shares the book identifier and record shape but
    /// answers with a `{success, books}` wrapper.
    pub const fn book_search() -> Self {
        Self {
            name: "book_search",
            path: "/api/books/search",
            id_field: "book_id",
            wrapper_key: Some("books"),
            singular: "book",
            plural: "books",
            mutable: false,
        }
    }

    pub const fn users() -> Self {
        Self {
            name: "users",
            path: "/api/users",
            id_field: "user_id",
            wrapper_key: Some("users"),
            singular: "user",
            plural: "users",
            mutable: true,
        }
    }

    pub const fn fines() -> Self {
        Self {
            name: "fines",
            path: "/api/fines",
            id_field: "id",
            wrapper_key: Some("fines"),
            singular: "fine",
            plural: "fines",
            mutable: true,
        }
    }

    pub const fn borrowings() -> Self {
        Self {
            name: "borrowings",
            path: "/api/borrowings",
            id_field: "borrowing_id",
            wrapper_key: Some("borrowings"),
            singular: "borrowing",
            plural: "borrowings",
            mutable: true,
        }
    }

    pub const fn notifications() -> Self {
        Self {
            name: "notifications",
            path: "/api/notifications",
            id_field: "notification_id",
            wrapper_key: Some("notifications"),
            singular: "notification",
            plural: "notifications",
            mutable: true,
        }
    }

    pub const fn categories() -> Self {
        Self {
            name: "categories",
            path: "/api/categories",
            id_field: "category_id",
            wrapper_key: Some("categories"),
            singular: "category",
            plural: "categories",
            mutable: false,
        }
    }

    /// All list collections, in menu order.
    pub fn all() -> [Collection; 7] {
        [
            Self::books(),
            Self::book_search(),
            Self::users(),
            Self::fines(),
            Self::borrowings(),
            Self::notifications(),
            Self::categories(),
        ]
    }

    /// Looks a collection up by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.name == name)
    }

    /// Looks up a collection that accepts mutations.
    pub fn mutable_from_name(name: &str) -> Option<Self> {
        Self::from_name(name).filter(|c| c.mutable)
    }

    /// Returns `/api/<collection>/<id>`.
    pub fn item_path(&self, id: &EntityId) -> String {
        format!("{}/{}", self.path, urlencoding::encode(id.as_str()))
    }

    /// Returns `/api/<collection>/<id>/<action>`.
    pub fn action_path(&self, id: &EntityId, action: &str) -> String {
        format!("{}/{}", self.item_path(id), action)
    }

    /// Builds the read request for this collection.
    pub fn list_request(&self, filters: &FilterSet) -> ApiRequest {
        ApiRequest::get(self.path).with_query(filters.clone())
    }

    /// Returns the singular name with a leading capital ("Book").
    pub fn title_singular(&self) -> String {
        capitalize(self.singular)
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
