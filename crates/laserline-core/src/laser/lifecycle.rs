//! Which object a laser termination destroys.
//!
//! A laser may be a child of a container (a twin-beam weapon, for example).
//! Every termination destroys exactly one root: the container when the laser
//! has one and the rule considers it, otherwise the laser itself. Destroying
//! a container cascades to all of its children, so the laser always ends up
//! destroyed either way.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::laser::{LaserVariant, Termination};

/// How far up the ownership chain a termination reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestroyScope {
    /// Destroy the parent container if present, else the laser.
    Root,
    /// Destroy only the laser, leaving any container alive.
    SelfOnly,
}

impl DestroyScope {
    /// Returns the scope used when a laser of `variant` terminates.
    ///
    /// Homing lasers never take their container down with them.
    #[must_use]
    pub const fn for_variant(variant: LaserVariant) -> Self {
        match variant {
            LaserVariant::Homing => Self::SelfOnly,
            _ => Self::Root,
        }
    }

    /// Picks the entity to destroy for a laser with the given parent.
    #[must_use]
    pub const fn root_of(self, laser: EntityId, parent: Option<EntityId>) -> EntityId {
        match (self, parent) {
            (Self::Root, Some(parent)) => parent,
            _ => laser,
        }
    }
}

/// Why an entity was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestroyCause {
    /// A laser's movement reached a terminal condition.
    Terminated(Termination),
    /// A laser was spent by hitting a damageable entity.
    Impact,
    /// A pickup was swept up by an enemy beam.
    Consumed,
    /// A damageable entity ran out of hit points.
    Depleted,
    /// The entity's parent container was destroyed.
    Cascade,
    /// Destroyed directly by the host (spawner, level script).
    External,
}
