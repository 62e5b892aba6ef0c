//! Domain layer for the library console.
//!
//! This crate describes the library API in terms the list views need:
//! - [`Collection`] descriptors (endpoint, identifier field, wrapper key)
//! - [`MutationRequest`] for create/update/delete and domain actions
//! - Response envelope decoding into a [`CollectionSnapshot`] or a [`MutationReply`]

pub mod collection;
pub mod envelope;
pub mod error;
pub mod mutation;
pub mod snapshot;

pub use collection::Collection;
pub use envelope::{MutationReply, decode_collection, decode_document, decode_mutation, decode_records};
pub use error::{DomainError, Result};
pub use mutation::{MutationKind, MutationRequest};
pub use snapshot::CollectionSnapshot;
