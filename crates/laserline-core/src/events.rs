//! Event log for telemetry and replay.
//!
//! The simulation records what happened during each tick as [`GameEvent`]s.
//! Recording never mutates game state. The host drains the log with
//! [`EventLog::take_events`], typically once per frame, to drive audio,
//! effects, or analytics.

use serde::{Deserialize, Serialize};

use crate::entity::{DamageResult, EntityId};
use crate::laser::lifecycle::DestroyCause;
use crate::laser::LaserVariant;

/// Something that happened in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A laser ran its activation step.
    LaserActivated {
        /// The laser.
        laser: EntityId,
        /// Its variant.
        variant: LaserVariant,
        /// Target acquired, for homing lasers that found one.
        target: Option<EntityId>,
    },
    /// A laser hit a damageable entity.
    DamageApplied {
        /// The laser that hit.
        laser: EntityId,
        /// The entity that took the hit.
        target: EntityId,
        /// What the hit did.
        result: DamageResult,
    },
    /// An enemy beam swept up a pickup.
    PickupConsumed {
        /// The beam.
        laser: EntityId,
        /// The pickup.
        pickup: EntityId,
    },
    /// An entity left the simulation.
    EntityDestroyed {
        /// The destroyed entity.
        entity: EntityId,
        /// Why it was destroyed.
        cause: DestroyCause,
    },
    /// The player was frozen by a Spinner hit.
    FreezeStarted {
        /// The frozen player.
        player: EntityId,
        /// Time at which the freeze ends.
        until: f64,
    },
    /// A freeze ran out and the player was restored.
    FreezeEnded {
        /// The restored player.
        player: EntityId,
    },
    /// A Spinner hit landed but there was no live player to freeze.
    FreezeSkipped {
        /// The laser that landed the hit.
        laser: EntityId,
    },
}

/// An event stamped with the simulation time it happened at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Simulation time.
    pub time: f64,
    /// What happened.
    pub event: GameEvent,
}

/// Append-only, drainable event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, time: f64, event: GameEvent) {
        self.records.push(EventRecord { time, event });
    }

    /// Returns the recorded events without draining them.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Drains and returns all recorded events in the order they happened.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// Returns the number of events currently in the log.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all events from the log without returning them.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
