//! Delayed tasks owned by entities.
//!
//! A task belongs to the entity it will mutate, not to whatever started it,
//! so it survives the destruction of its starter. When a task comes due the
//! simulation checks the owner is still alive before running it; tasks whose
//! owner has been destroyed are dropped instead.
//!
//! ```
//! use laserline_core::scheduler::{Scheduler, TaskAction};
//! use laserline_core::entity::{EntityId, Tint};
//!
//! let mut scheduler = Scheduler::new();
//! let owner = EntityId::new(1);
//! scheduler.schedule(owner, 2.0, TaskAction::Thaw { restore_speed: 5.0, restored_tint: Tint::WHITE });
//!
//! scheduler.advance(1.0);
//! assert!(scheduler.drain_due().is_empty());
//! scheduler.advance(1.0);
//! assert_eq!(scheduler.drain_due().len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, Tint};

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

/// What a task does when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TaskAction {
    /// End a freeze: restore the owner's movement speed and tint.
    Thaw {
        /// Speed to restore.
        restore_speed: f32,
        /// Tint to restore.
        restored_tint: Tint,
    },
}

/// A task waiting for its due time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Task identifier.
    pub id: TaskId,
    /// Entity the task acts on.
    pub owner: EntityId,
    /// Simulation time at which the task runs.
    pub due: f64,
    /// What to do.
    pub action: TaskAction,
}

/// Slack allowed when comparing the clock against a due time.
///
/// Frame times arrive as `f32` and are widened before they are summed, so a
/// clock fed `0.02` a hundred times reads `1.99999996`, not `2.0`. A task is
/// due once the clock is within this margin of its due time, which is far
/// below any frame length yet well above the drift of a long freeze.
pub const DUE_EPSILON: f64 = 1e-6;

/// Simulation clock plus the queue of pending tasks.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    /// Creates a scheduler at time zero with no tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current simulation time.
    #[must_use]
    pub const fn now(&self) -> f64 {
        self.now
    }

    /// Advances the clock.
    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }

    /// Schedules `action` on `owner` to run `delay` time units from now.
    pub fn schedule(&mut self, owner: EntityId, delay: f64, action: TaskAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            owner,
            due: self.now + delay,
            action,
        });
        id
    }

    /// Cancels a single task. Returns `false` if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancels every task owned by `owner` and returns how many were removed.
    pub fn cancel_owned_by(&mut self, owner: EntityId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.owner != owner);
        before - self.tasks.len()
    }

    /// Removes and returns every task whose due time has been reached
    /// (within [`DUE_EPSILON`]), ordered by due time, then by scheduling
    /// order.
    pub fn drain_due(&mut self) -> Vec<ScheduledTask> {
        let now = self.now + DUE_EPSILON;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due
    }

    /// Returns the pending tasks owned by `owner`.
    pub fn pending_for(&self, owner: EntityId) -> impl Iterator<Item = &ScheduledTask> + '_ {
        self.tasks.iter().filter(move |t| t.owner == owner)
    }

    /// Returns the number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no task is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
