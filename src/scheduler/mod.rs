/*!
 * Interleaving Scheduler
 * Rotates a list of tasks through work intervals and switch buffers, with a
 * long recharge rest queued as the final pseudo-task
 */

use crate::core::limits::{FIRST_TASK_ID, REST_TASK_ID};
use crate::core::types::{Seconds, TaskId};
use ahash::AHashMap;
use std::collections::VecDeque;
use tracing::info;

mod operations;
mod phase;
mod snapshot;
mod stats;
mod task;

pub use phase::{Phase, Transition};
pub use snapshot::{SchedulerSnapshot, TaskView};
pub use stats::SchedulerStats;
pub use task::{PhaseLedger, Task};

/// Which collection currently owns a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Ready,
    Running,
    Halted,
}

/// Arena slot plus current owner, for O(1) membership checks
#[derive(Debug, Clone, Copy)]
struct Slot {
    index: usize,
    location: Location,
}

/// Three-queue interleaving scheduler
///
/// Tasks live in an arena and never move; the `ready`, `running` and
/// `halted` collections hold ids only, and `slots` records which one owns
/// each id. Every mutation goes through `&mut self`, so the driving loop is
/// the single owner.
#[derive(Debug, Clone)]
pub struct InterleavingScheduler {
    tasks: Vec<Task>,
    slots: AHashMap<TaskId, Slot>,

    ready: VecDeque<TaskId>,
    running: Option<TaskId>,
    halted: Vec<TaskId>,

    phase: Phase,
    elapsed: Seconds,

    stats: SchedulerStats,
}

impl InterleavingScheduler {
    /// Build a scheduler from task names, in dispatch order
    ///
    /// Names are trimmed and blank ones skipped. Ordinary tasks get ids
    /// counting up from 1 (stepping over the reserved rest id); the rest task
    /// is always queued last.
    pub fn new<I, S>(task_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scheduler = Self {
            tasks: Vec::new(),
            slots: AHashMap::new(),
            ready: VecDeque::new(),
            running: None,
            halted: Vec::new(),
            phase: Phase::Working,
            elapsed: 0.0,
            stats: SchedulerStats::default(),
        };

        let mut next_id = FIRST_TASK_ID;
        for name in task_names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if next_id == REST_TASK_ID {
                next_id += 1;
            }
            scheduler.enqueue(Task::new(next_id, name));
            next_id += 1;
        }
        scheduler.enqueue(Task::rest());

        info!(
            tasks = scheduler.tasks.len() - 1,
            "Interleaving scheduler initialized with rest task queued last"
        );
        scheduler
    }

    fn enqueue(&mut self, task: Task) {
        let id = task.id();
        self.slots.insert(
            id,
            Slot {
                index: self.tasks.len(),
                location: Location::Ready,
            },
        );
        self.tasks.push(task);
        self.ready.push_back(id);
    }

    /// Current phase
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Virtual seconds spent in the current phase
    #[inline]
    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }

    /// Boundary of the current phase
    #[inline]
    pub fn limit(&self) -> Seconds {
        self.phase.limit()
    }

    /// Seconds left before the current phase crosses its boundary
    #[inline]
    pub fn remaining(&self) -> Seconds {
        (self.limit() - self.elapsed).max(0.0)
    }

    /// Look up a task by id, wherever it currently lives
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.slots.get(&id).map(|slot| &self.tasks[slot.index])
    }

    /// Which collection owns the task, if the id is known
    pub fn location(&self, id: TaskId) -> Option<Location> {
        self.slots.get(&id).map(|slot| slot.location)
    }

    /// Tasks awaiting dispatch, in dispatch order
    pub fn ready(&self) -> impl Iterator<Item = &Task> + '_ {
        self.ready.iter().filter_map(|id| self.task(*id))
    }

    /// Task occupying the running slot
    pub fn running(&self) -> Option<&Task> {
        self.running.and_then(|id| self.task(id))
    }

    /// Completed tasks, in completion order
    pub fn halted(&self) -> impl Iterator<Item = &Task> + '_ {
        self.halted.iter().filter_map(|id| self.task(*id))
    }

    /// Number of tasks in each collection: (ready, running, halted)
    pub fn queue_lens(&self) -> (usize, usize, usize) {
        (
            self.ready.len(),
            usize::from(self.running.is_some()),
            self.halted.len(),
        )
    }

    /// Total number of tasks ever created, rest task included
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// A scheduler always holds the rest task
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether any ordinary task is still ready or running
    ///
    /// The rest task cycles forever once it is alone, so this is the
    /// natural end of a session.
    pub fn has_pending_work(&self) -> bool {
        self.running().into_iter().chain(self.ready()).any(|t| !t.is_rest())
    }

    fn set_location(&mut self, id: TaskId, location: Location) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.location = location;
        }
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        let index = self.slots.get(&id)?.index;
        self.tasks.get_mut(index)
    }
}

impl Default for InterleavingScheduler {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
