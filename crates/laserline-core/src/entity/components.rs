//! Component structs for entity types.
//!
//! The component structs hold all state for a particular entity type. Lasers
//! carry their behavior variant and tunables; the other entity types are the
//! collaborators a laser interacts with (ships, pickups, containers).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::LaserTuning;
use crate::entity::EntityId;
use crate::laser::LaserVariant;

// =============================================================================
// Transform
// =============================================================================

/// Position and orientation in the 2D play area.
///
/// `rotation` is in degrees about the +z axis. At rotation 0 the local "up"
/// axis points along world +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// World position.
    pub position: Vec2,
    /// Orientation in degrees (counter-clockwise).
    pub rotation: f32,
}

impl TransformState {
    /// Creates a transform at the given position and rotation.
    #[must_use]
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Creates an unrotated transform at the given position.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    /// Returns the unit vector of the local "up" axis in world space.
    #[must_use]
    pub fn local_up(&self) -> Vec2 {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Vec2::new(-sin, cos)
    }

    /// Returns the unit vector of the local "down" axis in world space.
    #[must_use]
    pub fn local_down(&self) -> Vec2 {
        -self.local_up()
    }

    /// Moves the transform `distance` units along a world-space direction.
    pub fn translate(&mut self, world_direction: Vec2, distance: f32) {
        self.position += world_direction * distance;
    }
}

// =============================================================================
// Visual tint
// =============================================================================

/// RGBA color applied to an entity's sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    /// Red channel, 0..=1.
    pub r: f32,
    /// Green channel, 0..=1.
    pub g: f32,
    /// Blue channel, 0..=1.
    pub b: f32,
    /// Alpha channel, 0..=1.
    pub a: f32,
}

impl Tint {
    /// Untinted sprite.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Pale cyan used while a ship is frozen.
    pub const FROZEN: Self = Self::rgba(0.4039, 0.9019, 1.0, 1.0);

    /// Creates a tint from its four channels.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

// =============================================================================
// Damage
// =============================================================================

/// Outcome of a single damage attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageResult {
    /// The hit was ignored (invulnerable or already depleted).
    NoEffect,
    /// A shield charge absorbed the hit.
    ShieldDamaged,
    /// The hit landed on the hull.
    Success,
}

/// Capability of taking a single hit.
pub trait Damageable {
    /// Applies one hit and reports what happened.
    fn try_damage(&mut self) -> DamageResult;
}

/// Hit points plus absorbing shield charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    /// Remaining hull hit points.
    pub hp: u32,
    /// Remaining shield charges; each absorbs one hit.
    pub shield: u32,
    /// While set, every hit has no effect.
    pub invulnerable: bool,
}

impl HealthState {
    /// Creates a health state with the given hit points and no shield.
    #[must_use]
    pub const fn new(hp: u32) -> Self {
        Self {
            hp,
            shield: 0,
            invulnerable: false,
        }
    }

    /// Returns a copy with the given number of shield charges.
    #[must_use]
    pub const fn with_shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self
    }

    /// Returns `true` once the hull has no hit points left.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.hp == 0
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Damageable for HealthState {
    fn try_damage(&mut self) -> DamageResult {
        if self.invulnerable || self.is_depleted() {
            DamageResult::NoEffect
        } else if self.shield > 0 {
            self.shield -= 1;
            DamageResult::ShieldDamaged
        } else {
            self.hp -= 1;
            DamageResult::Success
        }
    }
}

// =============================================================================
// Entity component sets
// =============================================================================

/// Components for Laser entities.
///
/// The variant and tunables are fixed at construction. The target is written
/// once, during activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserComponents {
    /// Position and orientation, mutated every tick.
    pub transform: TransformState,
    variant: LaserVariant,
    tuning: LaserTuning,
    target: Option<EntityId>,
    activated: bool,
}

impl LaserComponents {
    /// Creates an inactive laser.
    #[must_use]
    pub const fn new(variant: LaserVariant, tuning: LaserTuning, transform: TransformState) -> Self {
        Self {
            transform,
            variant,
            tuning,
            target: None,
            activated: false,
        }
    }

    /// Returns the behavior variant.
    #[must_use]
    pub const fn variant(&self) -> LaserVariant {
        self.variant
    }

    /// Returns the tunables.
    #[must_use]
    pub const fn tuning(&self) -> &LaserTuning {
        &self.tuning
    }

    /// Returns the handle captured at activation, if any.
    ///
    /// The handle may be stale; callers must check liveness in the arena.
    #[must_use]
    pub const fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Returns `true` once activation has run.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Marks the laser active with the resolved target. Runs at most once.
    pub(crate) fn activate(&mut self, target: Option<EntityId>) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;
        self.target = target;
        true
    }
}

/// Movement state of the player ship, written by the freeze effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementStatus {
    /// Current movement speed.
    pub speed: f32,
}

impl Default for MovementStatus {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

/// Components for the Player ship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerComponents {
    /// Position and orientation.
    pub transform: TransformState,
    /// Hull and shield.
    pub health: HealthState,
    /// Movement speed, zeroed while frozen.
    pub movement: MovementStatus,
    /// Sprite color.
    pub tint: Tint,
}

impl PlayerComponents {
    /// Creates a player ship at the given position.
    #[must_use]
    pub fn at_position(position: Vec2) -> Self {
        Self {
            transform: TransformState::at(position),
            ..Self::default()
        }
    }
}

/// Components for Enemy ships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyComponents {
    /// Position and orientation.
    pub transform: TransformState,
    /// Hull and shield.
    pub health: HealthState,
}

impl EnemyComponents {
    /// Creates an enemy at the given position.
    #[must_use]
    pub fn at_position(position: Vec2) -> Self {
        Self {
            transform: TransformState::at(position),
            health: HealthState::default(),
        }
    }
}

/// Components for collectible pickups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickupComponents {
    /// Position of the pickup.
    pub transform: TransformState,
}

/// Components for composite containers (e.g. a twin-beam weapon that owns
/// two lasers). A container may itself be damageable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerComponents {
    /// Position of the container.
    pub transform: TransformState,
    /// Optional shared hull for composite ships.
    pub health: Option<HealthState>,
}
