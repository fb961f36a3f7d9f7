//! One-shot target acquisition for homing lasers.
//!
//! Targeting runs once, at activation. The result is stored as an
//! [`EntityId`] and never refreshed; the movement step treats a handle whose
//! entity is gone the same as no target at all.

use glam::Vec2;

use crate::entity::EntityId;

/// Source of homing candidates.
///
/// Implemented by [`Arena`](crate::arena::Arena) (all live enemies in ID
/// order) and by plain slices for tests and tools.
pub trait EnemyRegistry {
    /// Returns every candidate with its current position, in a stable order.
    fn enemies(&self) -> Vec<(EntityId, Vec2)>;
}

impl EnemyRegistry for [(EntityId, Vec2)] {
    fn enemies(&self) -> Vec<(EntityId, Vec2)> {
        self.to_vec()
    }
}

impl EnemyRegistry for Vec<(EntityId, Vec2)> {
    fn enemies(&self) -> Vec<(EntityId, Vec2)> {
        self.clone()
    }
}

/// Picks the enemy closest to `origin`.
///
/// Ties keep the first candidate in registry order. Returns `None` when the
/// registry is empty.
#[must_use]
pub fn nearest_target<R: EnemyRegistry + ?Sized>(origin: Vec2, registry: &R) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for (id, position) in registry.enemies() {
        let distance = origin.distance(position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ if distance.is_nan() => {}
            _ => best = Some((id, distance)),
        }
    }
    best.map(|(id, _)| id)
}
