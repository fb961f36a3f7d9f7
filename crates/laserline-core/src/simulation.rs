//! Simulation driver: the two entry points into laser state.
//!
//! The host engine calls [`Simulation::step`] once per frame and
//! [`Simulation::on_overlap`] whenever its collision pass reports a laser
//! touching something. Both may run in the same frame and both may destroy
//! entities, so every operation checks liveness first and destroys are
//! idempotent.
//!
//! # Tick order
//!
//! 1. **CLOCK**: advance simulation time and run due timer tasks (thaws),
//!    each after a liveness check on its owner
//! 2. **LASERS**: for every live laser in ID order, activate it if needed,
//!    run exactly one movement strategy, and apply its termination
//!
//! # Example
//!
//! ```
//! use laserline_core::simulation::{LaserSpawn, Simulation};
//! use laserline_core::laser::LaserVariant;
//! use glam::Vec2;
//!
//! let mut sim = Simulation::new();
//! let laser = sim
//!     .spawn_laser(LaserSpawn::new(LaserVariant::Player, Vec2::new(0.0, 5.0)))
//!     .unwrap();
//!
//! // The default play area tops out at y = 5.5; one tick at speed 8 crosses it.
//! sim.step(0.1);
//! assert!(!sim.arena().is_alive(laser));
//! ```

use glam::Vec2;
use tracing::{debug, trace, warn};

use crate::arena::Arena;
use crate::config::{LaserTuning, SimulationConfig};
use crate::entity::{
    DamageResult, Entity, EntityId, EntityInner, EntityTag, LaserComponents, PlayerComponents,
    TransformState,
};
use crate::error::{ConfigError, LaserError};
use crate::events::{EventLog, EventRecord, GameEvent};
use crate::laser::freeze::{run_task, start_freeze};
use crate::laser::lifecycle::DestroyCause;
use crate::laser::movement::StepContext;
use crate::laser::{
    nearest_target, CollisionOutcome, CollisionResolver, DestroyScope, LaserVariant,
    LegacyLaserFlags, LevelBounds,
};
use crate::scheduler::Scheduler;

/// Spawn-time configuration of a laser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserSpawn {
    /// Behavior variant.
    pub variant: LaserVariant,
    /// Tunables.
    pub tuning: LaserTuning,
    /// Initial position and rotation.
    pub transform: TransformState,
    /// Owning container, if the laser is part of a composite weapon.
    pub parent: Option<EntityId>,
}

impl LaserSpawn {
    /// Creates an unrotated, unparented laser with stock tuning.
    #[must_use]
    pub fn new(variant: LaserVariant, position: Vec2) -> Self {
        Self {
            variant,
            tuning: LaserTuning::default(),
            transform: TransformState::at(position),
            parent: None,
        }
    }

    /// Sets the tunables.
    #[must_use]
    pub const fn with_tuning(mut self, tuning: LaserTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Sets the initial rotation in degrees.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Attaches the laser to a container.
    #[must_use]
    pub const fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Owner of all simulation state.
#[derive(Debug, Clone)]
pub struct Simulation {
    arena: Arena,
    bounds: LevelBounds,
    config: SimulationConfig,
    scheduler: Scheduler,
    events: EventLog,
    collisions: CollisionResolver,
    player: Option<EntityId>,
    tick: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Creates a simulation with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = SimulationConfig::default();
        Self {
            arena: Arena::new(),
            bounds: config.bounds,
            config,
            scheduler: Scheduler::new(),
            events: EventLog::new(),
            collisions: CollisionResolver::new(),
            player: None,
            tick: 0,
        }
    }

    /// Creates a simulation from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in `config`.
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bounds: config.bounds,
            config,
            ..Self::new()
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Returns the arena for direct setup (spawning collaborators, moving
    /// ships).
    #[must_use]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the current play area.
    #[must_use]
    pub fn bounds(&self) -> &LevelBounds {
        &self.bounds
    }

    /// Replaces the play area. Lasers read it fresh every tick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedBounds`] and keeps the old bounds if
    /// the new ones are inverted.
    pub fn set_bounds(&mut self, bounds: LevelBounds) -> Result<(), ConfigError> {
        bounds.validate()?;
        debug!(?bounds, "level bounds changed");
        self.bounds = bounds;
        Ok(())
    }

    /// Returns the scheduler (clock and pending timer tasks).
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the event log.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        self.events.take_events()
    }

    /// Returns the registered player handle, if any. It may be stale.
    #[must_use]
    pub const fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// Registers the entity the freeze effect acts on.
    pub fn set_player(&mut self, player: Option<EntityId>) {
        self.player = player;
    }

    // -------------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------------

    /// Spawns the player ship and registers it as the freeze target.
    pub fn spawn_player(&mut self, components: PlayerComponents) -> EntityId {
        let id = self.arena.spawn(EntityInner::Player(components));
        self.player = Some(id);
        id
    }

    /// Spawns an inactive laser.
    ///
    /// # Errors
    ///
    /// Returns [`LaserError::Config`] for invalid tuning and
    /// [`LaserError::InvalidParent`] when the parent is not a live container.
    pub fn spawn_laser(&mut self, spawn: LaserSpawn) -> Result<EntityId, LaserError> {
        spawn.tuning.validate()?;
        let inner = EntityInner::Laser(LaserComponents::new(
            spawn.variant,
            spawn.tuning,
            spawn.transform,
        ));
        let id = match spawn.parent {
            Some(parent) => self.arena.spawn_child(inner, parent)?,
            None => self.arena.spawn(inner),
        };
        trace!(laser = %id, variant = %spawn.variant, parent = ?spawn.parent, "laser spawned");
        Ok(id)
    }

    /// Spawns a laser described by legacy variant flags, interpreted under
    /// the configured [`VariantPolicy`](crate::laser::VariantPolicy).
    ///
    /// # Errors
    ///
    /// Returns [`LaserError::ConflictingVariants`] for a conflicting flag set
    /// under the strict policy, plus every error of [`Self::spawn_laser`].
    pub fn spawn_legacy_laser(
        &mut self,
        flags: LegacyLaserFlags,
        spawn: LaserSpawn,
    ) -> Result<EntityId, LaserError> {
        let variant = LaserVariant::from_flags(flags, self.config.variant_policy)?;
        self.spawn_laser(LaserSpawn { variant, ..spawn })
    }

    // -------------------------------------------------------------------------
    // Activation
    // -------------------------------------------------------------------------

    /// Activates a laser: homing lasers acquire the nearest enemy.
    ///
    /// Activation happens once. Calling it again returns the target captured
    /// the first time. Lasers that were never activated explicitly are
    /// activated at the start of their first tick.
    ///
    /// # Errors
    ///
    /// Returns [`LaserError::EntityNotFound`] or [`LaserError::NotALaser`].
    pub fn activate_laser(&mut self, id: EntityId) -> Result<Option<EntityId>, LaserError> {
        let entity = self.arena.get(id).ok_or(LaserError::EntityNotFound(id))?;
        let laser = entity.as_laser().ok_or(LaserError::NotALaser {
            id,
            tag: entity.tag(),
        })?;
        if laser.is_activated() {
            return Ok(laser.target());
        }
        Ok(self.activate_resolved(id))
    }

    /// Runs activation for a live, not yet activated laser.
    fn activate_resolved(&mut self, id: EntityId) -> Option<EntityId> {
        let (variant, origin) = self
            .laser(id)
            .map(|laser| (laser.variant(), laser.transform.position))?;
        let target = if variant == LaserVariant::Homing {
            let target = nearest_target(origin, &self.arena);
            if target.is_none() {
                debug!(laser = %id, "no enemies to home in on, flying straight");
            }
            target
        } else {
            None
        };

        if let Some(laser) = self.arena.get_mut(id).and_then(Entity::as_laser_mut) {
            laser.activate(target);
        }
        debug!(laser = %id, %variant, ?target, "laser activated");
        self.record(GameEvent::LaserActivated {
            laser: id,
            variant,
            target,
        });
        target
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advances the simulation by `dt` time units.
    ///
    /// A negative or non-finite `dt` is treated as zero: due timers still
    /// run, but nothing moves and the clock stands still.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "ignoring invalid frame time");
            0.0
        };
        self.scheduler.advance(f64::from(dt));
        self.run_due_tasks();

        for id in self.arena.ids_with_tag(EntityTag::Laser) {
            self.step_laser(id, dt);
        }
        self.tick += 1;
    }

    fn run_due_tasks(&mut self) {
        for task in self.scheduler.drain_due() {
            if run_task(&mut self.arena, &task) {
                self.record(GameEvent::FreezeEnded { player: task.owner });
            }
        }
    }

    fn step_laser(&mut self, id: EntityId, dt: f32) {
        // A collision or cascade earlier this frame may have removed it.
        let Some(activated) = self.laser(id).map(LaserComponents::is_activated) else {
            return;
        };
        if !activated {
            self.activate_resolved(id);
        }

        let target_position = self
            .laser(id)
            .and_then(LaserComponents::target)
            .and_then(|target| self.arena.get(target))
            .map(Entity::position);

        let bounds = self.bounds;
        let Some(entity) = self.arena.get_mut(id) else {
            return;
        };
        let parent = entity.parent();
        let Some(laser) = entity.as_laser_mut() else {
            return;
        };
        let variant = laser.variant();
        let ctx = StepContext {
            dt,
            bounds: &bounds,
            target_position,
        };
        let outcome = variant.strategy().step(laser, &ctx);

        if let Some(termination) = outcome.termination {
            let root = DestroyScope::for_variant(variant).root_of(id, parent);
            debug!(laser = %id, %variant, ?termination, %root, "laser terminated");
            self.destroy_with_cause(root, DestroyCause::Terminated(termination));
        }
    }

    fn laser(&self, id: EntityId) -> Option<&LaserComponents> {
        self.arena.get(id).and_then(Entity::as_laser)
    }

    // -------------------------------------------------------------------------
    // Collisions
    // -------------------------------------------------------------------------

    /// Handles an overlap reported by the collision pass.
    ///
    /// Overlaps involving an entity that is already destroyed are ignored,
    /// as are overlaps the laser's variant does not react to.
    pub fn on_overlap(&mut self, laser: EntityId, other: EntityId) -> CollisionOutcome {
        let outcome = self.collisions.resolve(&mut self.arena, laser, other);
        if outcome.is_empty() {
            return outcome;
        }

        if let Some((target, result)) = outcome.damage {
            debug!(%laser, %target, ?result, "laser hit");
            self.record(GameEvent::DamageApplied {
                laser,
                target,
                result,
            });
            if result == DamageResult::Success && self.is_depleted(target) {
                self.destroy_with_cause(target, DestroyCause::Depleted);
            }
        }

        if outcome.freeze {
            self.freeze_player(laser);
        }

        if let Some(pickup) = outcome.consumed_pickup {
            self.record(GameEvent::PickupConsumed { laser, pickup });
            self.destroy_with_cause(pickup, DestroyCause::Consumed);
        }

        if let Some(scope) = outcome.spend_laser {
            let parent = self.arena.get(laser).and_then(Entity::parent);
            self.destroy_with_cause(scope.root_of(laser, parent), DestroyCause::Impact);
        }

        outcome
    }

    fn is_depleted(&self, id: EntityId) -> bool {
        self.arena
            .get(id)
            .and_then(|e| e.inner().health())
            .is_some_and(|h| h.is_depleted())
    }

    fn freeze_player(&mut self, laser: EntityId) {
        let settings = self.config.freeze;
        let frozen = self.player.and_then(|player| {
            start_freeze(&mut self.arena, &mut self.scheduler, player, &settings)
                .map(|until| (player, until))
        });
        match frozen {
            Some((player, until)) => self.record(GameEvent::FreezeStarted { player, until }),
            None => {
                warn!(%laser, "spinner hit landed with no live player to freeze");
                self.record(GameEvent::FreezeSkipped { laser });
            }
        }
    }

    // -------------------------------------------------------------------------
    // Destruction
    // -------------------------------------------------------------------------

    /// Destroys an entity (and everything it owns) on behalf of the host.
    ///
    /// Returns the destroyed IDs; empty if the entity was already gone.
    pub fn destroy(&mut self, id: EntityId) -> Vec<EntityId> {
        self.destroy_with_cause(id, DestroyCause::External)
    }

    fn destroy_with_cause(&mut self, root: EntityId, cause: DestroyCause) -> Vec<EntityId> {
        let destroyed = self.arena.destroy(root);
        for &entity in &destroyed {
            let cause = if entity == root { cause } else { DestroyCause::Cascade };
            self.scheduler.cancel_owned_by(entity);
            self.record(GameEvent::EntityDestroyed { entity, cause });
        }
        if destroyed.is_empty() {
            trace!(entity = %root, "destroy ignored, already gone");
        }
        destroyed
    }

    fn record(&mut self, event: GameEvent) {
        self.events.record(self.scheduler.now(), event);
    }
}
