//! # Laserline Core
//!
//! Projectile state machine for a 2D arcade shooter.
//!
//! Every laser in play is one of five variants (player, homing, double
//! beamer, spinner, back shooter). Each tick a laser runs exactly one
//! movement strategy and may terminate itself; each overlap reported by the
//! host's collision pass is resolved against the laser's variant and may
//! damage, freeze, consume, or destroy.
//!
//! ## Architecture
//!
//! - **Arena**: owns every entity by stable, never-reused ID; destroying a
//!   container destroys what it owns
//! - **Laser**: variants, movement strategies, collision rules, targeting
//! - **Scheduler**: entity-owned timers, used to end the freeze effect
//! - **Simulation**: the two entry points, [`Simulation::step`] and
//!   [`Simulation::on_overlap`]
//!
//! ## Usage
//!
//! ```rust
//! use glam::Vec2;
//! use laserline_core::entity::{EnemyComponents, EntityInner};
//! use laserline_core::laser::LaserVariant;
//! use laserline_core::{LaserSpawn, Simulation};
//!
//! let mut sim = Simulation::new();
//! let enemy = sim
//!     .arena_mut()
//!     .spawn(EntityInner::Enemy(EnemyComponents::at_position(Vec2::new(0.0, 3.0))));
//! let laser = sim.spawn_laser(LaserSpawn::new(LaserVariant::Homing, Vec2::ZERO))?;
//!
//! assert_eq!(sim.activate_laser(laser)?, Some(enemy));
//! # Ok::<(), laserline_core::LaserError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arena;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod laser;
pub mod scheduler;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use arena::Arena;
pub use config::{FreezeSettings, LaserTuning, SimulationConfig};
pub use entity::{Entity, EntityId, EntityTag};
pub use error::{ConfigError, LaserError};
pub use events::{EventLog, EventRecord, GameEvent};
pub use laser::{LaserVariant, LegacyLaserFlags, LevelBounds, VariantPolicy};
pub use simulation::{LaserSpawn, Simulation};
