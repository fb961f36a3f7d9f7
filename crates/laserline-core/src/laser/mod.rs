//! Laser behavior: variant classification and the per-variant subsystems.
//!
//! A laser is configured once at spawn into exactly one [`LaserVariant`].
//! Each tick the variant selects a [`MovementStrategy`]; overlap events are
//! answered by the collision rules of the same variant.
//!
//! - [`movement`]: per-tick displacement and orientation
//! - [`targeting`]: one-shot nearest-enemy acquisition for homing lasers
//! - [`bounds`]: play-area containment predicate
//! - [`collision`]: overlap resolution (damage, pickups, freeze)
//! - [`lifecycle`]: which root object a termination destroys
//! - [`freeze`]: the timed freeze status applied to the player

pub mod bounds;
pub mod collision;
pub mod freeze;
pub mod lifecycle;
pub mod movement;
pub mod targeting;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LaserError;

pub use bounds::LevelBounds;
pub use collision::{CollisionOutcome, CollisionResolver};
pub use lifecycle::DestroyScope;
pub use movement::{MovementStrategy, StepOutcome, Termination};
pub use targeting::{nearest_target, EnemyRegistry};

/// Behavior variant of a laser. Fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaserVariant {
    /// Fired by the player; flies up and expires at the top edge.
    #[default]
    Player,
    /// Fired by the player; steers toward the nearest enemy.
    Homing,
    /// Enemy laser flying down; consumed by any damage it deals.
    DoubleBeamer,
    /// Enemy laser flying down; freezes the player on a hull hit.
    Spinner,
    /// Enemy laser flying up from behind; consumed by any damage it deals.
    BackShooter,
}

impl LaserVariant {
    /// All variants, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Player,
        Self::Homing,
        Self::DoubleBeamer,
        Self::Spinner,
        Self::BackShooter,
    ];

    /// Returns the movement strategy this variant runs every tick.
    #[must_use]
    pub const fn strategy(self) -> MovementStrategy {
        match self {
            Self::Player => MovementStrategy::Player,
            Self::Homing => MovementStrategy::Homing,
            Self::DoubleBeamer | Self::Spinner => MovementStrategy::Downward,
            Self::BackShooter => MovementStrategy::Upward,
        }
    }

    /// Returns `true` for lasers fired by enemies.
    #[must_use]
    pub const fn is_enemy_laser(self) -> bool {
        matches!(self, Self::DoubleBeamer | Self::Spinner | Self::BackShooter)
    }

    /// Returns `true` for lasers fired by the player.
    #[must_use]
    pub const fn is_player_laser(self) -> bool {
        !self.is_enemy_laser()
    }

    /// Returns `true` if any damage dealt consumes the laser and it sweeps
    /// up pickups in its path.
    #[must_use]
    pub const fn is_beam(self) -> bool {
        matches!(self, Self::DoubleBeamer | Self::BackShooter)
    }

    /// Returns the legacy flag set that encodes this variant.
    #[must_use]
    pub const fn flags(self) -> LegacyLaserFlags {
        match self {
            Self::Player => LegacyLaserFlags::PLAYER,
            Self::Homing => LegacyLaserFlags::HOMING,
            Self::DoubleBeamer => LegacyLaserFlags::DOUBLE_BEAMER,
            Self::Spinner => LegacyLaserFlags::SPINNER,
            Self::BackShooter => LegacyLaserFlags::BACK_SHOOTER,
        }
    }

    /// Converts a legacy flag set into a variant.
    ///
    /// Under [`VariantPolicy::Strict`] at most one behavior flag may be set
    /// (`PLAYER` combines only with `HOMING`). Under
    /// [`VariantPolicy::Precedence`] any combination resolves as: no behavior
    /// flag → Player, then Homing, then DoubleBeamer/Spinner, then BackShooter.
    ///
    /// # Errors
    ///
    /// Returns [`LaserError::ConflictingVariants`] for a conflicting set under
    /// the strict policy.
    pub fn from_flags(flags: LegacyLaserFlags, policy: VariantPolicy) -> Result<Self, LaserError> {
        let behavior = flags.difference(LegacyLaserFlags::PLAYER);
        if policy == VariantPolicy::Strict {
            let conflicting = behavior.bits().count_ones() > 1
                || (flags.contains(LegacyLaserFlags::PLAYER)
                    && behavior.intersects(LegacyLaserFlags::ENEMY));
            if conflicting {
                return Err(LaserError::ConflictingVariants { flags });
            }
        }

        let variant = if behavior.is_empty() {
            Self::Player
        } else if behavior.contains(LegacyLaserFlags::HOMING) {
            Self::Homing
        } else if behavior.contains(LegacyLaserFlags::DOUBLE_BEAMER) {
            Self::DoubleBeamer
        } else if behavior.contains(LegacyLaserFlags::SPINNER) {
            Self::Spinner
        } else {
            Self::BackShooter
        };
        Ok(variant)
    }
}

impl fmt::Display for LaserVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Homing => write!(f, "homing"),
            Self::DoubleBeamer => write!(f, "double_beamer"),
            Self::Spinner => write!(f, "spinner"),
            Self::BackShooter => write!(f, "back_shooter"),
        }
    }
}

bitflags! {
    /// Variant switches as written by older spawners, one per `Assign*` call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LegacyLaserFlags: u8 {
        /// Fired by the player.
        const PLAYER = 1 << 0;
        /// Homing laser.
        const HOMING = 1 << 1;
        /// Double beamer enemy laser.
        const DOUBLE_BEAMER = 1 << 2;
        /// Spinner enemy laser.
        const SPINNER = 1 << 3;
        /// Back shooter enemy laser.
        const BACK_SHOOTER = 1 << 4;

        /// Every enemy variant.
        const ENEMY = Self::DOUBLE_BEAMER.bits() | Self::SPINNER.bits() | Self::BACK_SHOOTER.bits();
    }
}

/// How multi-flag legacy configurations are treated at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantPolicy {
    /// Reject conflicting flag sets.
    #[default]
    Strict,
    /// Resolve conflicting flag sets by dispatch precedence.
    Precedence,
}
