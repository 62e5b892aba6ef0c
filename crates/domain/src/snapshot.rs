//! The most recent successful read of a collection.

use std::collections::HashSet;

use common::{Entity, EntityId};

use crate::{DomainError, Result};

/// Ordered entities from one successful read.
///
/// A snapshot is always replaced wholesale; there is no way to patch one.
/// Identifiers are unique within a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionSnapshot {
    entities: Vec<Entity>,
}

impl CollectionSnapshot {
    /// Creates a snapshot, rejecting duplicate identifiers.
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if !seen.insert(entity.id()) {
                return Err(DomainError::DuplicateIdentifier(entity.id().clone()));
            }
        }
        Ok(Self { entities })
    }

    /// Creates an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over entities in server order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Returns the entities as a slice.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks up an entity by identifier.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Returns the identifiers in order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id().clone()).collect()
    }
}
