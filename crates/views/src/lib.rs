//! Render models for the library list views.
//!
//! Rendering is a pure function of an entity and the caller's capabilities:
//! - [`RenderModel`] trait mapping [`Entity`](common::Entity) to [`RowModel`]
//! - [`Capabilities`] passed in explicitly instead of looked up globally
//! - One renderer per collection, plus the notification feed, report table,
//!   category options and preferences form

pub mod error;
pub mod format;
pub mod render;
pub mod views;

pub use error::{Result, ViewError};
pub use render::{
    Badge, Capabilities, Capability, Cell, RenderModel, RowAction, RowModel, TableBody, Tone,
};
pub use views::{
    BookRows, BorrowingRows, CategoryOptions, FineRows, NotificationFeed, NotificationItem,
    NotificationRows, Preferences, ReportTable, UserRows,
};
