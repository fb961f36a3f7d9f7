//! Test helper functions for setting up simulations and entities.

use glam::Vec2;

use crate::entity::{
    ContainerComponents, EnemyComponents, EntityId, EntityInner, HealthState, PickupComponents,
    PlayerComponents, Tint, TransformState,
};
use crate::events::{EventRecord, GameEvent};
use crate::laser::lifecycle::DestroyCause;
use crate::laser::LaserVariant;
use crate::simulation::{LaserSpawn, Simulation};

/// Fixed frame length used by most tests.
pub const DT: f32 = 0.1;

// =============================================================================
// Entity Factory Functions
// =============================================================================

/// Spawns the player ship (3 hp, no shield) and registers it.
pub fn spawn_player(sim: &mut Simulation, position: Vec2) -> EntityId {
    sim.spawn_player(PlayerComponents::at_position(position))
}

/// Spawns an enemy with the given health.
pub fn spawn_enemy_with(sim: &mut Simulation, position: Vec2, health: HealthState) -> EntityId {
    sim.arena_mut().spawn(EntityInner::Enemy(EnemyComponents {
        transform: TransformState::at(position),
        health,
    }))
}

/// Spawns a default enemy (3 hp).
pub fn spawn_enemy(sim: &mut Simulation, position: Vec2) -> EntityId {
    sim.arena_mut()
        .spawn(EntityInner::Enemy(EnemyComponents::at_position(position)))
}

/// Spawns a pickup.
pub fn spawn_pickup(sim: &mut Simulation, position: Vec2) -> EntityId {
    sim.arena_mut().spawn(EntityInner::Pickup(PickupComponents {
        transform: TransformState::at(position),
    }))
}

/// Spawns a container, optionally with a shared hull.
pub fn spawn_container(sim: &mut Simulation, health: Option<HealthState>) -> EntityId {
    sim.arena_mut()
        .spawn(EntityInner::Container(ContainerComponents {
            transform: TransformState::default(),
            health,
        }))
}

/// Spawns an unparented laser with stock tuning.
pub fn spawn_laser(sim: &mut Simulation, variant: LaserVariant, position: Vec2) -> EntityId {
    sim.spawn_laser(LaserSpawn::new(variant, position))
        .expect("stock laser spawns")
}

/// Spawns a laser owned by `parent`.
pub fn spawn_laser_in(
    sim: &mut Simulation,
    variant: LaserVariant,
    position: Vec2,
    parent: EntityId,
) -> EntityId {
    sim.spawn_laser(LaserSpawn::new(variant, position).with_parent(parent))
        .expect("parent is a live container")
}

// =============================================================================
// State Readers
// =============================================================================

/// Returns true if the entity is gone.
pub fn is_destroyed(sim: &Simulation, id: EntityId) -> bool {
    !sim.arena().is_alive(id)
}

/// Returns the position of an entity.
pub fn get_position(sim: &Simulation, id: EntityId) -> Option<Vec2> {
    sim.arena().get(id).map(crate::entity::Entity::position)
}

/// Returns the rotation of a laser in degrees.
pub fn get_rotation(sim: &Simulation, id: EntityId) -> Option<f32> {
    sim.arena()
        .get(id)
        .and_then(|e| e.as_laser())
        .map(|l| l.transform.rotation)
}

/// Returns hp of a damageable entity.
pub fn get_hp(sim: &Simulation, id: EntityId) -> Option<u32> {
    sim.arena()
        .get(id)
        .and_then(|e| e.inner().health())
        .map(|h| h.hp)
}

/// Returns the player's speed and tint.
pub fn player_status(sim: &Simulation, id: EntityId) -> (f32, Tint) {
    let player = sim
        .arena()
        .get(id)
        .and_then(|e| e.as_player())
        .expect("player is alive");
    (player.movement.speed, player.tint)
}

/// Steps the simulation `n` times with [`DT`].
pub fn step_n(sim: &mut Simulation, n: usize) {
    for _ in 0..n {
        sim.step(DT);
    }
}

/// Steps until `id` is destroyed and returns the number of ticks taken.
pub fn ticks_until_destroyed(sim: &mut Simulation, id: EntityId, limit: usize) -> Option<usize> {
    for tick in 1..=limit {
        sim.step(DT);
        if is_destroyed(sim, id) {
            return Some(tick);
        }
    }
    None
}

// =============================================================================
// Event Filters
// =============================================================================

/// Extracts `(entity, cause)` for every destroy in a record list.
pub fn destroyed(records: &[EventRecord]) -> Vec<(EntityId, DestroyCause)> {
    records
        .iter()
        .filter_map(|r| match r.event {
            GameEvent::EntityDestroyed { entity, cause } => Some((entity, cause)),
            _ => None,
        })
        .collect()
}

/// Counts records matching a predicate.
pub fn count_events(records: &[EventRecord], pred: impl Fn(&GameEvent) -> bool) -> usize {
    records.iter().filter(|r| pred(&r.event)).count()
}
