//! Error types for laser configuration and spawning.
//!
//! Runtime behavior never fails: missing targets, missing players, irrelevant
//! overlaps and repeated destroys all degrade silently. Errors are only raised
//! when a laser or the simulation is configured with values that cannot work.

use thiserror::Error;

use crate::entity::{EntityId, EntityTag};
use crate::laser::LegacyLaserFlags;

/// Errors raised while spawning or addressing lasers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaserError {
    /// More than one variant flag was set under a strict policy.
    #[error("conflicting laser variant flags: {flags:?}")]
    ConflictingVariants {
        /// The offending flag set.
        flags: LegacyLaserFlags,
    },

    /// The referenced entity does not exist (never spawned or already destroyed).
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The referenced entity exists but is not a laser.
    #[error("entity {id} is a {tag}, not a laser")]
    NotALaser {
        /// The entity that was addressed.
        id: EntityId,
        /// Its actual tag.
        tag: EntityTag,
    },

    /// The parent container handle does not refer to a live container.
    #[error("entity {0} is not a live container")]
    InvalidParent(EntityId),

    /// The laser tuning failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by configuration validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A tunable must be a finite, non-negative number.
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidTunable {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Level bounds with `left > right` or `bottom > top`.
    #[error("inverted level bounds: left {left}, right {right}, bottom {bottom}, top {top}")]
    InvertedBounds {
        /// Left edge.
        left: f32,
        /// Right edge.
        right: f32,
        /// Bottom edge.
        bottom: f32,
        /// Top edge.
        top: f32,
    },

    /// The freeze effect must last a positive, finite amount of time.
    #[error("freeze duration must be positive and finite, got {0}")]
    InvalidFreezeDuration(f64),
}
