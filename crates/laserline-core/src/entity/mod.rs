//! Entity model for the laser simulation.
//!
//! - [`EntityId`]: handle for an entity; never reused, so a handle to a
//!   destroyed entity simply stops resolving
//! - [`EntityTag`]: type classification (lasers, ships, pickups, containers)
//! - [`EntityInner`]: type-safe storage for entity-specific components
//! - [`Entity`]: the complete entity container, including its optional parent
//!
//! # Example
//!
//! ```
//! use laserline_core::entity::{Entity, EntityId, EntityTag, EntityInner};
//! use laserline_core::entity::components::PickupComponents;
//!
//! let pickup = Entity::new(
//!     EntityId::new(42),
//!     EntityTag::Pickup,
//!     EntityInner::Pickup(PickupComponents::default()),
//! );
//!
//! assert_eq!(pickup.id().as_u64(), 42);
//! assert!(pickup.is_pickup());
//! assert!(pickup.parent().is_none());
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{
    ContainerComponents, DamageResult, Damageable, EnemyComponents, HealthState, LaserComponents,
    MovementStatus, PickupComponents, PlayerComponents, Tint, TransformState,
};

/// Unique identifier for an entity.
///
/// IDs are assigned monotonically by the arena and never reused, which makes
/// an `EntityId` usable as a weak reference: once the entity is destroyed,
/// lookups by its ID return `None`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Entity type tag.
///
/// Replaces scene-wide tag lookups: the arena answers "all enemies" and
/// "the player" by filtering on this tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// A laser projectile.
    Laser,
    /// The player ship.
    Player,
    /// An enemy ship; candidate homing target.
    Enemy,
    /// A collectible pickup.
    Pickup,
    /// A composite object owning child entities.
    Container,
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laser => write!(f, "Laser"),
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Pickup => write!(f, "Pickup"),
            Self::Container => write!(f, "Container"),
        }
    }
}

/// Type-safe storage for entity-specific components.
///
/// The variant always matches the entity's tag; [`Entity::from_inner`]
/// derives the tag so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Laser components (variant, tunables, transform, target)
    Laser(LaserComponents),
    /// Player ship components (health, movement, tint)
    Player(PlayerComponents),
    /// Enemy ship components (health)
    Enemy(EnemyComponents),
    /// Pickup components (position only)
    Pickup(PickupComponents),
    /// Container components (optional shared health)
    Container(ContainerComponents),
}

impl EntityInner {
    /// Returns the corresponding `EntityTag` for this inner storage.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Laser(_) => EntityTag::Laser,
            Self::Player(_) => EntityTag::Player,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Pickup(_) => EntityTag::Pickup,
            Self::Container(_) => EntityTag::Container,
        }
    }

    /// Returns the entity's transform.
    #[must_use]
    pub const fn transform(&self) -> &TransformState {
        match self {
            Self::Laser(c) => &c.transform,
            Self::Player(c) => &c.transform,
            Self::Enemy(c) => &c.transform,
            Self::Pickup(c) => &c.transform,
            Self::Container(c) => &c.transform,
        }
    }

    /// Returns the damage capability, if this entity type has one.
    #[must_use]
    pub fn health(&self) -> Option<&HealthState> {
        match self {
            Self::Player(c) => Some(&c.health),
            Self::Enemy(c) => Some(&c.health),
            Self::Container(c) => c.health.as_ref(),
            Self::Laser(_) | Self::Pickup(_) => None,
        }
    }

    /// Returns the mutable damage capability, if this entity type has one.
    #[must_use]
    pub fn health_mut(&mut self) -> Option<&mut HealthState> {
        match self {
            Self::Player(c) => Some(&mut c.health),
            Self::Enemy(c) => Some(&mut c.health),
            Self::Container(c) => c.health.as_mut(),
            Self::Laser(_) | Self::Pickup(_) => None,
        }
    }

    /// Returns a reference to the laser components, if this is a laser.
    #[must_use]
    pub const fn as_laser(&self) -> Option<&LaserComponents> {
        match self {
            Self::Laser(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a mutable reference to the laser components, if this is a laser.
    #[must_use]
    pub fn as_laser_mut(&mut self) -> Option<&mut LaserComponents> {
        match self {
            Self::Laser(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a reference to the player components, if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerComponents> {
        match self {
            Self::Player(components) => Some(components),
            _ => None,
        }
    }

    /// Returns a mutable reference to the player components, if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerComponents> {
        match self {
            Self::Player(components) => Some(components),
            _ => None,
        }
    }
}

/// A complete entity in the simulation.
///
/// # Invariants
///
/// - The `EntityId` is unique within an arena
/// - The `EntityTag` matches the `EntityInner` variant
/// - `parent`, when set, referred to a live container at spawn time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    tag: EntityTag,
    inner: EntityInner,
    parent: Option<EntityId>,
}

impl Entity {
    /// Creates a new root entity with the given ID, tag, and inner storage.
    ///
    /// The caller is responsible for `tag` and `inner` agreeing; prefer
    /// [`Entity::from_inner`].
    #[must_use]
    pub const fn new(id: EntityId, tag: EntityTag, inner: EntityInner) -> Self {
        Self {
            id,
            tag,
            inner,
            parent: None,
        }
    }

    /// Creates a root entity, deriving the tag from the inner storage.
    #[must_use]
    pub const fn from_inner(id: EntityId, inner: EntityInner) -> Self {
        Self::new(id, inner.tag(), inner)
    }

    /// Returns a copy of this entity attached to `parent`.
    #[must_use]
    pub const fn with_parent(mut self, parent: Option<EntityId>) -> Self {
        self.parent = parent;
        self
    }

    /// Returns the entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's type tag.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    /// Returns the parent container, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Returns a reference to the entity's inner component storage.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns a mutable reference to the entity's inner component storage.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Returns the entity's world position.
    #[must_use]
    pub const fn position(&self) -> glam::Vec2 {
        self.inner.transform().position
    }

    /// Returns `true` if this entity is a laser.
    #[must_use]
    pub const fn is_laser(&self) -> bool {
        matches!(self.tag, EntityTag::Laser)
    }

    /// Returns `true` if this entity is an enemy.
    #[must_use]
    pub const fn is_enemy(&self) -> bool {
        matches!(self.tag, EntityTag::Enemy)
    }

    /// Returns `true` if this entity is a collectible pickup.
    #[must_use]
    pub const fn is_pickup(&self) -> bool {
        matches!(self.tag, EntityTag::Pickup)
    }

    /// Returns `true` if this entity is a container.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self.tag, EntityTag::Container)
    }

    /// Returns `true` if this entity can take damage.
    #[must_use]
    pub fn is_damageable(&self) -> bool {
        self.inner.health().is_some()
    }

    /// Returns the laser components if this is a laser, `None` otherwise.
    #[must_use]
    pub const fn as_laser(&self) -> Option<&LaserComponents> {
        self.inner.as_laser()
    }

    /// Returns mutable laser components if this is a laser, `None` otherwise.
    #[must_use]
    pub fn as_laser_mut(&mut self) -> Option<&mut LaserComponents> {
        self.inner.as_laser_mut()
    }

    /// Returns the player components if this is the player, `None` otherwise.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerComponents> {
        self.inner.as_player()
    }

    /// Returns mutable player components if this is the player, `None` otherwise.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerComponents> {
        self.inner.as_player_mut()
    }
}
