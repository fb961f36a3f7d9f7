//! Overlap resolution for lasers.
//!
//! The `CollisionResolver` handles one overlap between a laser and another
//! entity:
//! - DoubleBeamer/BackShooter hitting a damageable entity: one hit on the
//!   topmost damageable in its lineage; the beam is spent whatever the result
//! - Spinner hitting anything with a damageable lineage: one hit; a shield
//!   hit spends the laser, a hull hit also freezes the player
//! - DoubleBeamer/BackShooter touching a pickup: the pickup is consumed and
//!   the beam flies on
//! - Player and Homing lasers: overlaps are ignored
//!
//! # Outcome
//!
//! The resolver applies the damage itself (the hit is what the overlap
//! *is*), and reports everything else in a [`CollisionOutcome`] for the
//! simulation to carry out: destroying entities, starting the freeze, and
//! recording events.

use tracing::trace;

use crate::arena::Arena;
use crate::entity::{DamageResult, Damageable, Entity, EntityId};
use crate::laser::{DestroyScope, LaserVariant};

/// What an overlap asks the simulation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionOutcome {
    /// The entity that took a hit, and the result.
    pub damage: Option<(EntityId, DamageResult)>,
    /// Set when the laser is spent, with the scope of the destroy.
    pub spend_laser: Option<DestroyScope>,
    /// Set when the hit should freeze the player.
    pub freeze: bool,
    /// Pickup swept up by the beam.
    pub consumed_pickup: Option<EntityId>,
}

impl CollisionOutcome {
    /// Returns `true` if the overlap had no effect at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Stateless resolver for laser overlaps.
///
/// # Example
///
/// ```
/// use laserline_core::arena::Arena;
/// use laserline_core::config::LaserTuning;
/// use laserline_core::entity::{EntityInner, LaserComponents, PickupComponents, TransformState};
/// use laserline_core::laser::{CollisionResolver, LaserVariant};
///
/// let mut arena = Arena::new();
/// let beam = arena.spawn(EntityInner::Laser(LaserComponents::new(
///     LaserVariant::DoubleBeamer,
///     LaserTuning::default(),
///     TransformState::default(),
/// )));
/// let pickup = arena.spawn(EntityInner::Pickup(PickupComponents::default()));
///
/// let outcome = CollisionResolver::new().resolve(&mut arena, beam, pickup);
/// assert_eq!(outcome.consumed_pickup, Some(pickup));
/// assert!(outcome.spend_laser.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates a new collision resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves an overlap between `laser` and `other`.
    ///
    /// Returns an empty outcome if `laser` is not a live laser, `other` is
    /// gone, or the variant does not react to this kind of entity.
    pub fn resolve(&self, arena: &mut Arena, laser: EntityId, other: EntityId) -> CollisionOutcome {
        let mut outcome = CollisionOutcome::default();
        if laser == other {
            return outcome;
        }
        let Some(variant) = arena.get(laser).and_then(Entity::as_laser).map(|l| l.variant()) else {
            return outcome;
        };
        let Some(other_entity) = arena.get(other) else {
            return outcome;
        };
        let other_damageable = other_entity.is_damageable();
        let other_is_pickup = other_entity.is_pickup();
        let scope = DestroyScope::for_variant(variant);

        if variant.is_beam() && other_damageable {
            if let Some((target, result)) = hit(arena, other) {
                outcome.damage = Some((target, result));
                outcome.spend_laser = Some(scope);
            }
        } else if variant == LaserVariant::Spinner {
            if let Some((target, result)) = hit(arena, other) {
                outcome.damage = Some((target, result));
                match result {
                    DamageResult::ShieldDamaged => outcome.spend_laser = Some(scope),
                    DamageResult::Success => {
                        outcome.freeze = true;
                        outcome.spend_laser = Some(scope);
                    }
                    DamageResult::NoEffect => {}
                }
            }
        }

        if variant.is_beam() && other_is_pickup {
            outcome.consumed_pickup = Some(other);
        }

        trace!(%laser, %other, %variant, ?outcome, "overlap resolved");
        outcome
    }
}

/// Applies one hit to the topmost damageable entity in `other`'s lineage.
fn hit(arena: &mut Arena, other: EntityId) -> Option<(EntityId, DamageResult)> {
    let target = arena.damageable_root(other)?;
    let health = arena.get_mut(target)?.inner_mut().health_mut()?;
    Some((target, health.try_damage()))
}
