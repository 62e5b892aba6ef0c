//! Shared value types used across the library console workspace.

pub mod filter;
pub mod types;

pub use filter::FilterSet;
pub use types::{Entity, EntityId};
