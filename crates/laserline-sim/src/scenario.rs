//! Scenario files: a starting layout plus how long to run it.
//!
//! ```json
//! {
//!   "config": { "bounds": { "top": 5.5 } },
//!   "dt": 0.02,
//!   "ticks": 300,
//!   "player": { "position": [0.0, -4.0] },
//!   "enemies": [{ "position": [2.0, 3.0], "hp": 3 }],
//!   "weapons": [{ "lasers": [{ "variant": "double_beamer", "position": [1.0, 4.0] }] }],
//!   "lasers": [{ "variant": "homing", "position": [0.0, -3.5] }]
//! }
//! ```

use anyhow::{ensure, Context, Result};
use glam::Vec2;
use serde::Deserialize;
use tracing::debug;

use laserline_core::entity::{
    ContainerComponents, EnemyComponents, EntityId, EntityInner, HealthState, PickupComponents,
    PlayerComponents, TransformState,
};
use laserline_core::laser::LaserVariant;
use laserline_core::{LaserSpawn, LaserTuning, Simulation, SimulationConfig};

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_ticks() -> usize {
    600
}

fn default_overlap_radius() -> f32 {
    0.25
}

/// Top-level scenario document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Simulation settings.
    #[serde(default)]
    pub config: SimulationConfig,
    /// Frame time passed to every step.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Number of frames to run.
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    /// Two entities closer than this overlap.
    #[serde(default = "default_overlap_radius")]
    pub overlap_radius: f32,
    /// The player ship, registered as the freeze target.
    #[serde(default)]
    pub player: Option<ShipDef>,
    /// Enemy ships; homing lasers pick from these.
    #[serde(default)]
    pub enemies: Vec<ShipDef>,
    /// Pickups that beams can sweep up.
    #[serde(default)]
    pub pickups: Vec<PointDef>,
    /// Composite weapons, each a container owning its lasers.
    #[serde(default)]
    pub weapons: Vec<WeaponDef>,
    /// Free-standing lasers.
    #[serde(default)]
    pub lasers: Vec<LaserDef>,
}

/// A player or enemy ship.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShipDef {
    /// Starting position.
    pub position: Vec2,
    /// Hit points.
    #[serde(default = "default_hp")]
    pub hp: u32,
    /// Shield charges absorbed before hit points.
    #[serde(default)]
    pub shield: u32,
}

fn default_hp() -> u32 {
    3
}

impl ShipDef {
    fn health(&self) -> HealthState {
        HealthState::new(self.hp).with_shield(self.shield)
    }
}

/// Something that only has a position.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointDef {
    /// Position.
    pub position: Vec2,
}

/// A container owning several lasers, optionally with a shared hull.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponDef {
    /// Shared hull; `None` for a weapon that cannot be hit.
    #[serde(default)]
    pub hp: Option<u32>,
    /// Lasers owned by the weapon.
    pub lasers: Vec<LaserDef>,
}

/// A laser and its spawn-time configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaserDef {
    /// Behavior variant.
    pub variant: LaserVariant,
    /// Spawn position.
    pub position: Vec2,
    /// Spawn rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    /// Tunables; omitted fields keep stock values.
    #[serde(default)]
    pub tuning: LaserTuning,
}

impl LaserDef {
    fn spawn(&self) -> LaserSpawn {
        LaserSpawn::new(self.variant, self.position)
            .with_rotation(self.rotation)
            .with_tuning(self.tuning)
    }
}

impl Scenario {
    /// Parses a scenario document.
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text).context("malformed scenario")?;
        ensure!(
            scenario.dt.is_finite() && scenario.dt > 0.0,
            "dt must be positive, got {}",
            scenario.dt
        );
        ensure!(
            scenario.overlap_radius.is_finite() && scenario.overlap_radius >= 0.0,
            "overlap_radius must be non-negative, got {}",
            scenario.overlap_radius
        );
        Ok(scenario)
    }

    /// Builds the starting simulation.
    pub fn build(&self) -> Result<Simulation> {
        let mut sim = Simulation::with_config(self.config).context("invalid config")?;

        if let Some(player) = &self.player {
            let id = sim.spawn_player(PlayerComponents {
                health: player.health(),
                ..PlayerComponents::at_position(player.position)
            });
            debug!(%id, "player placed");
        }
        for enemy in &self.enemies {
            sim.arena_mut().spawn(EntityInner::Enemy(EnemyComponents {
                transform: TransformState::at(enemy.position),
                health: enemy.health(),
            }));
        }
        for pickup in &self.pickups {
            sim.arena_mut().spawn(EntityInner::Pickup(PickupComponents {
                transform: TransformState::at(pickup.position),
            }));
        }
        for (index, weapon) in self.weapons.iter().enumerate() {
            let container = sim.arena_mut().spawn(EntityInner::Container(ContainerComponents {
                transform: TransformState::default(),
                health: weapon.hp.map(HealthState::new),
            }));
            for laser in &weapon.lasers {
                sim.spawn_laser(laser.spawn().with_parent(container))
                    .with_context(|| format!("weapon {index}"))?;
            }
        }
        for (index, laser) in self.lasers.iter().enumerate() {
            sim.spawn_laser(laser.spawn())
                .with_context(|| format!("laser {index}"))?;
        }
        Ok(sim)
    }
}

/// Finds every (laser, other) pair closer than `radius`, in ID order.
///
/// Stands in for the host engine's collision pass.
pub fn overlaps(sim: &Simulation, radius: f32) -> Vec<(EntityId, EntityId)> {
    let arena = sim.arena();
    let mut pairs = Vec::new();
    for laser in arena.entities_sorted().filter(|e| e.is_laser()) {
        for other in arena.entities_sorted() {
            if other.id() == laser.id() || other.is_laser() || other.is_container() {
                continue;
            }
            if laser.position().distance(other.position()) <= radius {
                pairs.push((laser.id(), other.id()));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let scenario = Scenario::from_json("{}").unwrap();
        assert_eq!(scenario.ticks, 600);
        assert!(scenario.player.is_none());
        let sim = scenario.build().unwrap();
        assert!(sim.arena().is_empty());
    }

    #[test]
    fn rejects_bad_dt() {
        assert!(Scenario::from_json(r#"{ "dt": 0.0 }"#).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Scenario::from_json(r#"{ "enemys": [] }"#).is_err());
    }

    #[test]
    fn builds_weapons_as_containers() {
        let scenario = Scenario::from_json(
            r#"{
                "weapons": [{ "lasers": [
                    { "variant": "double_beamer", "position": [-0.5, 0.0] },
                    { "variant": "double_beamer", "position": [0.5, 0.0] }
                ] }]
            }"#,
        )
        .unwrap();
        let sim = scenario.build().unwrap();
        let container = sim.arena().entities_sorted().find(|e| e.is_container()).unwrap();
        assert_eq!(sim.arena().children_of(container.id()).len(), 2);
    }

    #[test]
    fn overlap_pairs_skip_lasers_and_containers() {
        let scenario = Scenario::from_json(
            r#"{
                "player": { "position": [0.0, 0.0] },
                "lasers": [
                    { "variant": "spinner", "position": [0.0, 0.1] },
                    { "variant": "spinner", "position": [0.0, 0.2] }
                ]
            }"#,
        )
        .unwrap();
        let sim = scenario.build().unwrap();
        let pairs = overlaps(&sim, 0.25);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|&(_, other)| Some(other) == sim.player()));
    }
}
