//! Render models for each library collection.

pub mod books;
pub mod borrowings;
pub mod categories;
pub mod fines;
pub mod notifications;
pub mod preferences;
pub mod reports;
pub mod users;

pub use books::BookRows;
pub use borrowings::BorrowingRows;
pub use categories::CategoryOptions;
pub use fines::FineRows;
pub use notifications::{NotificationFeed, NotificationItem, NotificationRows};
pub use preferences::Preferences;
pub use reports::ReportTable;
pub use users::UserRows;
