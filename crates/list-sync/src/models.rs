//! Default render model per collection.

use std::sync::Arc;

use domain::Collection;
use views::{BookRows, BorrowingRows, FineRows, NotificationRows, RenderModel, UserRows};

/// Returns the render model used for `collection`'s list view.
///
/// Categories have no list view of their own; they feed the category filter
/// through [`CategoryLoader`](crate::CategoryLoader).
pub fn render_model_for(collection: &Collection) -> Option<Arc<dyn RenderModel>> {
    let model: Arc<dyn RenderModel> = match collection.name {
        "books" => Arc::new(BookRows::new()),
        "book_search" => Arc::new(BookRows::search()),
        "users" => Arc::new(UserRows::new()),
        "fines" => Arc::new(FineRows::new()),
        "borrowings" => Arc::new(BorrowingRows::new()),
        "notifications" => Arc::new(NotificationRows::new()),
        _ => return None,
    };
    Some(model)
}
