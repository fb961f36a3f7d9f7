//! Per-tick movement strategies.
//!
//! Each strategy moves the laser and reports whether it has reached a
//! terminal condition. Strategies never destroy anything themselves; the
//! simulation turns a [`Termination`] into a destroy through the lifecycle
//! rules.
//!
//! | Strategy   | Axis               | Terminates when                 |
//! |------------|--------------------|---------------------------------|
//! | `Player`   | local up           | `y >= top`                      |
//! | `Downward` | local down         | outside any edge                |
//! | `Upward`   | local up           | outside any edge                |
//! | `Homing`   | local up, steering | within `homing_distance` of target |

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::LaserComponents;
use crate::laser::LevelBounds;

/// Movement algorithm selected by a laser's variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementStrategy {
    /// Straight up until the top edge.
    Player,
    /// Steer toward the acquired target; without a live target, fly like
    /// `Player` along the current heading.
    ///
    /// The fallback only checks the top edge. A laser that lost its target
    /// while turned sideways or downward never reaches it and flies on until
    /// the host destroys it.
    Homing,
    /// Straight down until out of bounds.
    Downward,
    /// Straight up until out of bounds.
    Upward,
}

/// Why a laser's flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// Reached or passed the top edge.
    ReachedTop,
    /// Left the play area.
    OutOfBounds,
    /// Came within homing distance of its target.
    ReachedTarget,
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Strategy that ran.
    pub strategy: MovementStrategy,
    /// Terminal condition detected after moving, if any.
    pub termination: Option<Termination>,
}

/// World state a strategy reads during one step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Elapsed time for this tick.
    pub dt: f32,
    /// Current play area; read fresh every tick.
    pub bounds: &'a LevelBounds,
    /// Position of the laser's target if it is still alive.
    pub target_position: Option<Vec2>,
}

impl MovementStrategy {
    /// Moves `laser` for one tick and checks its terminal condition.
    #[must_use]
    pub fn step(self, laser: &mut LaserComponents, ctx: &StepContext<'_>) -> StepOutcome {
        let termination = match self {
            Self::Player => fly_player(laser, ctx),
            Self::Homing => match ctx.target_position {
                Some(target) => fly_homing(laser, ctx, target),
                None => fly_player(laser, ctx),
            },
            Self::Downward => {
                let axis = laser.transform.local_down();
                fly_straight(laser, ctx, axis)
            }
            Self::Upward => {
                let axis = laser.transform.local_up();
                fly_straight(laser, ctx, axis)
            }
        };
        StepOutcome {
            strategy: self,
            termination,
        }
    }
}

fn fly_player(laser: &mut LaserComponents, ctx: &StepContext<'_>) -> Option<Termination> {
    let distance = laser.tuning().speed * ctx.dt;
    let axis = laser.transform.local_up();
    laser.transform.translate(axis, distance);
    ctx.bounds
        .reached_top(laser.transform.position)
        .then_some(Termination::ReachedTop)
}

fn fly_straight(laser: &mut LaserComponents, ctx: &StepContext<'_>, axis: Vec2) -> Option<Termination> {
    let distance = laser.tuning().speed * ctx.dt;
    laser.transform.translate(axis, distance);
    ctx.bounds
        .is_out_of_bounds(laser.transform.position)
        .then_some(Termination::OutOfBounds)
}

fn fly_homing(laser: &mut LaserComponents, ctx: &StepContext<'_>, target: Vec2) -> Option<Termination> {
    let tuning = *laser.tuning();
    if let Some(direction) = (target - laser.transform.position).try_normalize() {
        let heading = heading_of(direction);
        laser.transform.rotation = rotate_towards(
            laser.transform.rotation,
            heading,
            tuning.rotation_speed * ctx.dt,
        );
    }

    let axis = laser.transform.local_up();
    laser.transform.translate(axis, tuning.speed * ctx.dt);

    (laser.transform.position.distance(target) < tuning.homing_distance)
        .then_some(Termination::ReachedTarget)
}

/// Returns the rotation (degrees) whose local up axis points along `direction`.
#[must_use]
pub fn heading_of(direction: Vec2) -> f32 {
    wrap_degrees(direction.y.atan2(direction.x).to_degrees() - 90.0)
}

/// Turns `current` toward `target` by at most `max_delta` degrees along the
/// shorter arc. The result is wrapped to `[-180, 180)`.
#[must_use]
pub fn rotate_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = wrap_degrees(target - current);
    let max_delta = max_delta.max(0.0);
    wrap_degrees(current + delta.clamp(-max_delta, max_delta))
}

/// Wraps an angle in degrees to `[-180, 180)`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaserTuning;
    use crate::entity::TransformState;
    use crate::laser::LaserVariant;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn bounds() -> LevelBounds {
        LevelBounds::new(-10.0, 10.0, 10.0, -10.0)
    }

    fn laser(variant: LaserVariant, position: Vec2) -> LaserComponents {
        LaserComponents::new(variant, LaserTuning::default(), TransformState::at(position))
    }

    fn ctx(bounds: &LevelBounds, dt: f32, target_position: Option<Vec2>) -> StepContext<'_> {
        StepContext {
            dt,
            bounds,
            target_position,
        }
    }

    mod straight_tests {
        use super::*;

        #[test]
        fn player_moves_up_by_speed_times_dt() {
            let b = bounds();
            let mut l = laser(LaserVariant::Player, Vec2::ZERO);
            let out = MovementStrategy::Player.step(&mut l, &ctx(&b, 0.5, None));
            assert_eq!(l.transform.position, Vec2::new(0.0, 4.0));
            assert_eq!(l.transform.rotation, 0.0);
            assert_eq!(out.termination, None);
        }

        #[test]
        fn player_terminates_at_top_inclusive() {
            let b = bounds();
            let mut l = laser(LaserVariant::Player, Vec2::new(0.0, 6.0));
            let out = MovementStrategy::Player.step(&mut l, &ctx(&b, 0.5, None));
            assert_eq!(l.transform.position.y, 10.0);
            assert_eq!(out.termination, Some(Termination::ReachedTop));
        }

        #[test]
        fn player_ignores_side_edges() {
            let b = bounds();
            let mut l = laser(LaserVariant::Player, Vec2::new(50.0, 0.0));
            let out = MovementStrategy::Player.step(&mut l, &ctx(&b, 0.1, None));
            assert_eq!(out.termination, None);
        }

        #[test]
        fn downward_moves_down() {
            let b = bounds();
            let mut l = laser(LaserVariant::Spinner, Vec2::ZERO);
            let out = MovementStrategy::Downward.step(&mut l, &ctx(&b, 0.25, None));
            assert_eq!(l.transform.position, Vec2::new(0.0, -2.0));
            assert_eq!(out.termination, None);
        }

        #[test]
        fn downward_terminates_below_bottom() {
            let b = bounds();
            let mut l = laser(LaserVariant::DoubleBeamer, Vec2::new(0.0, -9.5));
            let out = MovementStrategy::Downward.step(&mut l, &ctx(&b, 0.25, None));
            assert_eq!(out.termination, Some(Termination::OutOfBounds));
        }

        #[test]
        fn upward_terminates_above_top_but_not_on_it() {
            let b = bounds();
            let mut l = laser(LaserVariant::BackShooter, Vec2::new(0.0, 8.0));
            let out = MovementStrategy::Upward.step(&mut l, &ctx(&b, 0.25, None));
            assert_eq!(l.transform.position.y, 10.0);
            assert_eq!(out.termination, None);

            let out = MovementStrategy::Upward.step(&mut l, &ctx(&b, 0.25, None));
            assert_eq!(out.termination, Some(Termination::OutOfBounds));
        }

        #[test]
        fn rotated_laser_moves_along_its_own_axis() {
            let b = bounds();
            let mut l = LaserComponents::new(
                LaserVariant::BackShooter,
                LaserTuning::with_speed(2.0),
                TransformState::new(Vec2::ZERO, -90.0),
            );
            let _ = MovementStrategy::Upward.step(&mut l, &ctx(&b, 1.0, None));
            assert!((l.transform.position - Vec2::new(2.0, 0.0)).length() < EPS);
            assert_eq!(l.transform.rotation, -90.0);
        }
    }

    mod homing_tests {
        use super::*;

        #[test]
        fn without_target_matches_player() {
            let b = bounds();
            let mut homing = laser(LaserVariant::Homing, Vec2::new(1.0, -3.0));
            let mut player = laser(LaserVariant::Player, Vec2::new(1.0, -3.0));
            for _ in 0..10 {
                let h = MovementStrategy::Homing.step(&mut homing, &ctx(&b, 0.1, None));
                let p = MovementStrategy::Player.step(&mut player, &ctx(&b, 0.1, None));
                assert_eq!(homing.transform, player.transform);
                assert_eq!(h.termination, p.termination);
            }
        }

        #[test]
        fn turn_is_clamped_to_rotation_speed() {
            let b = bounds();
            let mut l = laser(LaserVariant::Homing, Vec2::ZERO);
            // Target due right: heading -90, max turn 300 * 0.1 = 30 degrees.
            let _ = MovementStrategy::Homing.step(&mut l, &ctx(&b, 0.1, Some(Vec2::new(9.0, 0.0))));
            assert!((l.transform.rotation + 30.0).abs() < EPS);
        }

        #[test]
        fn moves_along_post_rotation_heading() {
            let b = bounds();
            let mut l = laser(LaserVariant::Homing, Vec2::ZERO);
            let _ = MovementStrategy::Homing.step(&mut l, &ctx(&b, 0.1, Some(Vec2::new(9.0, 0.0))));
            let expected = TransformState::new(Vec2::ZERO, -30.0).local_up() * 0.8;
            assert!((l.transform.position - expected).length() < EPS);
        }

        #[test]
        fn small_error_snaps_onto_heading() {
            let b = bounds();
            let mut l = laser(LaserVariant::Homing, Vec2::ZERO);
            l.transform.rotation = 5.0;
            let _ = MovementStrategy::Homing.step(&mut l, &ctx(&b, 0.1, Some(Vec2::new(0.0, 9.0))));
            assert!(l.transform.rotation.abs() < EPS);
        }

        #[test]
        fn reaching_target_terminates() {
            let b = bounds();
            let mut l = laser(LaserVariant::Homing, Vec2::ZERO);
            let out = MovementStrategy::Homing.step(&mut l, &ctx(&b, 0.1, Some(Vec2::new(0.0, 2.5))));
            // Moved to y = 0.8; distance 1.7 < 2.0.
            assert_eq!(out.termination, Some(Termination::ReachedTarget));
        }

        #[test]
        fn homing_with_target_ignores_bounds() {
            let b = bounds();
            let mut l = laser(LaserVariant::Homing, Vec2::new(0.0, 20.0));
            let out = MovementStrategy::Homing.step(&mut l, &ctx(&b, 0.1, Some(Vec2::new(0.0, 40.0))));
            assert_eq!(out.termination, None);
        }

        #[test]
        fn target_on_top_of_laser_does_not_rotate() {
            let b = bounds();
            let mut l = laser(LaserVariant::Homing, Vec2::ZERO);
            l.transform.rotation = 45.0;
            let out = MovementStrategy::Homing.step(&mut l, &ctx(&b, 0.1, Some(Vec2::ZERO)));
            assert_eq!(l.transform.rotation, 45.0);
            assert_eq!(out.termination, Some(Termination::ReachedTarget));
        }
    }

    mod angle_tests {
        use super::*;

        #[test]
        fn heading_of_cardinal_directions() {
            assert!((heading_of(Vec2::Y)).abs() < EPS);
            assert!((heading_of(Vec2::X) + 90.0).abs() < EPS);
            assert!((heading_of(-Vec2::X) - 90.0).abs() < EPS);
            assert!((heading_of(-Vec2::Y) + 180.0).abs() < EPS);
        }

        #[test]
        fn rotate_takes_shorter_arc() {
            assert!((rotate_towards(170.0, -170.0, 5.0) - 175.0).abs() < EPS);
            assert!((rotate_towards(-170.0, 170.0, 5.0) + 175.0).abs() < EPS);
        }

        #[test]
        fn wrap_range() {
            assert_eq!(wrap_degrees(180.0), -180.0);
            assert_eq!(wrap_degrees(540.0), -180.0);
            assert!((wrap_degrees(-190.0) - 170.0).abs() < EPS);
        }
    }

    proptest! {
        #[test]
        fn straight_strategies_displace_exactly_speed_dt(
            speed in 0.0f32..50.0,
            dt in 0.0f32..0.1,
            rotation in -180.0f32..180.0,
            idx in 0usize..3,
        ) {
            let (variant, strategy) = [
                (LaserVariant::Player, MovementStrategy::Player),
                (LaserVariant::DoubleBeamer, MovementStrategy::Downward),
                (LaserVariant::BackShooter, MovementStrategy::Upward),
            ][idx];
            let b = LevelBounds::new(-1000.0, 1000.0, 1000.0, -1000.0);
            let mut l = LaserComponents::new(
                variant,
                LaserTuning::with_speed(speed),
                TransformState::new(Vec2::ZERO, rotation),
            );
            let before = l.transform;
            let _ = strategy.step(&mut l, &ctx(&b, dt, None));

            let moved = l.transform.position - before.position;
            let axis = if strategy == MovementStrategy::Downward {
                before.local_down()
            } else {
                before.local_up()
            };
            prop_assert!((moved - axis * speed * dt).length() < EPS);
            prop_assert_eq!(l.transform.rotation, before.rotation);
        }

        #[test]
        fn homing_turn_never_exceeds_rotation_speed_dt(
            rotation in -180.0f32..180.0,
            tx in -50.0f32..50.0,
            ty in -50.0f32..50.0,
            dt in 0.001f32..0.1,
        ) {
            let target = Vec2::new(tx, ty);
            prop_assume!(target.length() > 0.01);
            let b = bounds();
            let mut l = LaserComponents::new(
                LaserVariant::Homing,
                LaserTuning::default(),
                TransformState::new(Vec2::ZERO, rotation),
            );
            let _ = MovementStrategy::Homing.step(&mut l, &ctx(&b, dt, Some(target)));

            let turned = wrap_degrees(l.transform.rotation - rotation).abs();
            prop_assert!(turned <= 300.0 * dt + EPS);

            let moved = l.transform.position;
            prop_assert!((moved.length() - 8.0 * dt).abs() < EPS);
            let expected = l.transform.local_up() * 8.0 * dt;
            prop_assert!((moved - expected).length() < EPS);
        }
    }
}
