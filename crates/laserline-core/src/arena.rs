//! Arena module: storage and lifecycle for all simulation entities.
//!
//! The Arena provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Entity lifecycle management (spawn/destroy), with destroys cascading
//!   from containers to their children
//! - Parent/ancestor queries used by the collision rules
//! - The enemy registry used by homing lasers
//!
//! # Handles
//!
//! Entity IDs are monotonically increasing and never reused. Holding an
//! [`EntityId`] is therefore a weak reference: after the entity is destroyed,
//! [`Arena::get`] returns `None` and [`Arena::is_alive`] returns `false`.
//! Destroying an entity that is already gone is a no-op.
//!
//! # Example
//!
//! ```
//! use laserline_core::arena::Arena;
//! use laserline_core::entity::{EntityInner, ContainerComponents, PickupComponents};
//!
//! let mut arena = Arena::new();
//! let container = arena.spawn(EntityInner::Container(ContainerComponents::default()));
//! let child = arena
//!     .spawn_child(EntityInner::Pickup(PickupComponents::default()), container)
//!     .unwrap();
//!
//! // Destroying the container takes the child with it.
//! assert_eq!(arena.destroy(container), vec![container, child]);
//! assert!(!arena.is_alive(child));
//!
//! // A second destroy does nothing.
//! assert!(arena.destroy(container).is_empty());
//! ```

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityInner, EntityTag};
use crate::error::LaserError;
use crate::laser::EnemyRegistry;

/// Container for all simulation entities.
///
/// # Determinism
///
/// Entities are stored in a `BTreeMap` keyed by ID, so every iteration visits
/// them in spawn order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Live entities in deterministic order.
    entities: BTreeMap<EntityId, Entity>,
}

impl Arena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawns a root entity and returns its ID.
    pub fn spawn(&mut self, inner: EntityInner) -> EntityId {
        let id = self.next_entity_id();
        self.entities.insert(id, Entity::from_inner(id, inner));
        id
    }

    /// Spawns an entity owned by a live container.
    ///
    /// # Errors
    ///
    /// Returns [`LaserError::InvalidParent`] if `parent` is not a live
    /// container.
    pub fn spawn_child(&mut self, inner: EntityInner, parent: EntityId) -> Result<EntityId, LaserError> {
        if !self.get(parent).is_some_and(Entity::is_container) {
            return Err(LaserError::InvalidParent(parent));
        }
        let id = self.next_entity_id();
        self.entities
            .insert(id, Entity::from_inner(id, inner).with_parent(Some(parent)));
        Ok(id)
    }

    /// Destroys an entity and, recursively, everything it owns.
    ///
    /// Returns the destroyed IDs, the requested entity first and descendants
    /// after it in depth-first order. Returns an empty vector if the entity
    /// was already gone.
    pub fn destroy(&mut self, id: EntityId) -> Vec<EntityId> {
        if !self.is_alive(id) {
            return Vec::new();
        }

        let mut destroyed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if self.entities.remove(&next).is_none() {
                continue;
            }
            destroyed.push(next);
            let mut children = self.children_of(next);
            children.reverse();
            pending.extend(children);
        }
        destroyed
    }

    /// Returns `true` while the entity exists.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns a reference to an entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity by ID.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns an iterator over entity IDs in deterministic (sorted) order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Returns an iterator over entities in deterministic (sorted by ID) order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns the IDs of live entities with the given tag, in ID order.
    #[must_use]
    pub fn ids_with_tag(&self, tag: EntityTag) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.tag() == tag)
            .map(Entity::id)
            .collect()
    }

    /// Returns the direct children of an entity, in ID order.
    #[must_use]
    pub fn children_of(&self, id: EntityId) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.parent() == Some(id))
            .map(Entity::id)
            .collect()
    }

    /// Returns the entity followed by its live ancestors, nearest first.
    #[must_use]
    pub fn lineage(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id);
        while let Some(entity) = cursor {
            chain.push(entity.id());
            cursor = entity.parent().and_then(|p| self.get(p));
        }
        chain
    }

    /// Returns the topmost damageable entity in `id`'s lineage, including
    /// `id` itself.
    #[must_use]
    pub fn damageable_root(&self, id: EntityId) -> Option<EntityId> {
        self.lineage(id)
            .into_iter()
            .rev()
            .find(|&e| self.get(e).is_some_and(Entity::is_damageable))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the arena has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EnemyRegistry for Arena {
    fn enemies(&self) -> Vec<(EntityId, Vec2)> {
        self.entities
            .values()
            .filter(|e| e.is_enemy())
            .map(|e| (e.id(), e.position()))
            .collect()
    }
}
