//! Freeze status applied to the player by a Spinner hit.
//!
//! Starting a freeze stops the player and tints its sprite, then schedules a
//! thaw owned by the player. Freezing an already frozen player replaces the
//! pending thaw, so the freeze always lasts the full duration from the latest
//! hit.

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::config::FreezeSettings;
use crate::entity::{EntityId, PlayerComponents, Tint};
use crate::scheduler::{ScheduledTask, Scheduler, TaskAction};

/// Freezes `player` and schedules its thaw.
///
/// Returns the time the freeze ends, or `None` if the player is not alive.
pub fn start_freeze(
    arena: &mut Arena,
    scheduler: &mut Scheduler,
    player: EntityId,
    settings: &FreezeSettings,
) -> Option<f64> {
    let components = arena.get_mut(player)?.as_player_mut()?;
    components.movement.speed = 0.0;
    components.tint = settings.frozen_tint;

    let replaced = scheduler.cancel_owned_by(player);
    if replaced > 0 {
        trace!(%player, replaced, "freeze refreshed");
    }
    let action = TaskAction::Thaw {
        restore_speed: settings.restore_speed,
        restored_tint: settings.restored_tint,
    };
    scheduler.schedule(player, settings.duration, action);

    let until = scheduler.now() + settings.duration;
    debug!(%player, until, "player frozen");
    Some(until)
}

/// Runs a due task against its owner.
///
/// Returns `false` without touching anything when the owner is gone or is no
/// longer a player.
pub fn run_task(arena: &mut Arena, task: &ScheduledTask) -> bool {
    let Some(player) = arena.get_mut(task.owner).and_then(|e| e.as_player_mut()) else {
        debug!(owner = %task.owner, "dropping task for missing owner");
        return false;
    };
    match task.action {
        TaskAction::Thaw {
            restore_speed,
            restored_tint,
        } => thaw(player, restore_speed, restored_tint),
    }
    debug!(player = %task.owner, "player thawed");
    true
}

fn thaw(player: &mut PlayerComponents, speed: f32, tint: Tint) {
    player.tint = tint;
    player.movement.speed = speed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityInner, PickupComponents};
    use glam::Vec2;

    fn setup() -> (Arena, Scheduler, EntityId) {
        let mut arena = Arena::new();
        let player = arena.spawn(EntityInner::Player(PlayerComponents::at_position(Vec2::ZERO)));
        (arena, Scheduler::new(), player)
    }

    fn player_state(arena: &Arena, id: EntityId) -> (f32, Tint) {
        let p = arena.get(id).unwrap().as_player().unwrap();
        (p.movement.speed, p.tint)
    }

    #[test]
    fn freeze_then_thaw() {
        let (mut arena, mut scheduler, player) = setup();
        let settings = FreezeSettings::default();

        assert_eq!(start_freeze(&mut arena, &mut scheduler, player, &settings), Some(2.0));
        assert_eq!(player_state(&arena, player), (0.0, Tint::FROZEN));

        scheduler.advance(2.0);
        for task in scheduler.drain_due() {
            assert!(run_task(&mut arena, &task));
        }
        assert_eq!(player_state(&arena, player), (5.0, Tint::WHITE));
    }

    #[test]
    fn refreeze_replaces_pending_thaw() {
        let (mut arena, mut scheduler, player) = setup();
        let settings = FreezeSettings::default();

        start_freeze(&mut arena, &mut scheduler, player, &settings);
        scheduler.advance(1.5);
        start_freeze(&mut arena, &mut scheduler, player, &settings);
        assert_eq!(scheduler.len(), 1);

        scheduler.advance(1.0);
        assert!(scheduler.drain_due().is_empty());
        assert_eq!(player_state(&arena, player).0, 0.0);
    }

    #[test]
    fn missing_player_is_noop() {
        let (mut arena, mut scheduler, player) = setup();
        arena.destroy(player);
        let settings = FreezeSettings::default();
        assert_eq!(start_freeze(&mut arena, &mut scheduler, player, &settings), None);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn non_player_is_noop() {
        let (mut arena, mut scheduler, _) = setup();
        let pickup = arena.spawn(EntityInner::Pickup(PickupComponents::default()));
        let settings = FreezeSettings::default();
        assert_eq!(start_freeze(&mut arena, &mut scheduler, pickup, &settings), None);
    }

    #[test]
    fn thaw_skips_destroyed_owner() {
        let (mut arena, mut scheduler, player) = setup();
        start_freeze(&mut arena, &mut scheduler, player, &FreezeSettings::default());
        arena.destroy(player);
        scheduler.advance(2.0);
        let due = scheduler.drain_due();
        assert_eq!(due.len(), 1);
        assert!(!run_task(&mut arena, &due[0]));
    }
}
