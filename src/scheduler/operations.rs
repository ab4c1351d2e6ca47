/*!
 * Scheduler Core Operations
 * Tick, dispatch, switch, context switch and completion
 */

use super::phase::{Phase, Transition};
use super::{InterleavingScheduler, Location};
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Seconds, TaskId};
use tracing::{debug, info};

impl InterleavingScheduler {
    /// Advance virtual time by `seconds`; returns true once the current
    /// phase has reached its limit
    ///
    /// Dispatches first if nothing is running, so a fresh task is charged for
    /// the tick that brought it in. Never changes phase: the caller applies
    /// [`start_switch`](Self::start_switch) or
    /// [`context_switch`](Self::context_switch), or uses [`tick`](Self::tick).
    pub fn advance(&mut self, seconds: Seconds) -> SchedulerResult<bool> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(SchedulerError::InvalidArgument(format!(
                "tick of {} seconds; expected a finite, non-negative value",
                seconds
            )));
        }

        if self.running.is_none() {
            self.dispatch_next();
        }

        let Some(id) = self.running else {
            return Ok(false);
        };

        let phase = self.phase;
        self.elapsed += seconds;
        if let Some(task) = self.task_mut(id) {
            task.accumulate(phase, seconds);
        }
        self.stats.ticks += 1;

        let crossed = self.elapsed >= phase.limit();
        if crossed {
            self.stats.boundaries += 1;
            debug!(task = id, phase = %phase, elapsed = self.elapsed, "Phase boundary crossed");
        }
        Ok(crossed)
    }

    /// Decision the caller should apply if the last tick crossed a boundary
    pub fn pending_transition(&self) -> Transition {
        if self.running.is_some() && self.elapsed >= self.phase.limit() {
            self.phase.on_boundary()
        } else {
            Transition::None
        }
    }

    /// Advance and apply the resulting transition in one step
    pub fn tick(&mut self, seconds: Seconds) -> SchedulerResult<Transition> {
        if !self.advance(seconds)? {
            return Ok(Transition::None);
        }

        let transition = self.pending_transition();
        match transition {
            Transition::EnterSwitch => self.start_switch(),
            Transition::Cycle => self.context_switch(),
            Transition::None => {}
        }
        Ok(transition)
    }

    /// Move the head of `ready` into the running slot and reset the phase
    ///
    /// Returns the dispatched task id; no-op when nothing is ready or the
    /// slot is already occupied.
    pub fn dispatch_next(&mut self) -> Option<TaskId> {
        if self.running.is_some() {
            return None;
        }
        let id = self.ready.pop_front()?;
        let is_rest = self.task(id).map(|t| t.is_rest()).unwrap_or(false);

        self.running = Some(id);
        self.set_location(id, Location::Running);
        self.elapsed = 0.0;
        self.phase = if is_rest {
            Phase::Resting
        } else {
            Phase::Working
        };
        self.stats.dispatches += 1;

        debug!(task = id, phase = %self.phase, "Dispatched task");
        Some(id)
    }

    /// Enter the switch buffer; the running task keeps its slot
    pub fn start_switch(&mut self) {
        self.phase = Phase::Switching;
        self.elapsed = 0.0;
        self.stats.switches += 1;
        debug!(task = ?self.running, "Switch buffer started");
    }

    /// Requeue the running task at the tail of `ready` and dispatch the next
    ///
    /// Does nothing when no task is running.
    pub fn context_switch(&mut self) {
        let Some(id) = self.running.take() else {
            return;
        };

        self.ready.push_back(id);
        self.set_location(id, Location::Ready);
        self.stats.context_switches += 1;
        debug!(task = id, "Task requeued");

        self.dispatch_next();
    }

    /// Move a task to `halted`
    ///
    /// Completing the running task dispatches the next ready one straight
    /// away, without a switch buffer. Completing a ready task leaves the
    /// running slot alone. Failures leave every queue untouched.
    pub fn complete_task(&mut self, id: TaskId) -> SchedulerResult<()> {
        let (location, is_rest) = match (self.location(id), self.task(id)) {
            (Some(location), Some(task)) => (location, task.is_rest()),
            _ => return Err(SchedulerError::NotFound(id)),
        };

        if is_rest {
            return Err(SchedulerError::InvalidOperation(format!(
                "task {} is the rest task",
                id
            )));
        }

        match location {
            Location::Halted => return Err(SchedulerError::AlreadyHalted(id)),
            Location::Running => {
                self.running = None;
                self.halt(id);
                self.dispatch_next();
            }
            Location::Ready => {
                if let Some(pos) = self.ready.iter().position(|&queued| queued == id) {
                    self.ready.remove(pos);
                }
                self.halt(id);
            }
        }

        info!(task = id, ?location, "Task completed");
        Ok(())
    }

    /// Complete the first live, non-rest task with exactly this name
    pub fn complete_by_name(&mut self, name: &str) -> SchedulerResult<TaskId> {
        let found = self
            .running()
            .into_iter()
            .chain(self.ready())
            .find(|task| !task.is_rest() && task.name() == name)
            .map(|task| task.id());

        match found {
            Some(id) => self.complete_task(id).map(|()| id),
            None => Err(SchedulerError::NameNotFound(name.to_string())),
        }
    }

    fn halt(&mut self, id: TaskId) {
        self.halted.push(id);
        self.set_location(id, Location::Halted);
        self.stats.completions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::limits::REST_TASK_ID;

    fn drive(scheduler: &mut InterleavingScheduler, ticks: usize) -> usize {
        let mut boundaries = 0;
        for _ in 0..ticks {
            if scheduler.advance(1.0).unwrap() {
                boundaries += 1;
            }
        }
        boundaries
    }

    #[test]
    fn test_first_advance_dispatches_and_charges() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);

        assert!(!scheduler.advance(5.0).unwrap());
        assert_eq!(scheduler.running().unwrap().id(), 1);
        assert_eq!(scheduler.elapsed(), 5.0);
        assert_eq!(scheduler.running().unwrap().total_seconds(), 5.0);
    }

    #[test]
    fn test_advance_rejects_invalid_seconds() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);

        for bad in [-1.0, Seconds::NAN, Seconds::INFINITY] {
            let err = scheduler.advance(bad).unwrap_err();
            assert!(matches!(err, SchedulerError::InvalidArgument(_)));
        }
        // Rejected ticks must not dispatch
        assert!(scheduler.running().is_none());
        assert_eq!(scheduler.stats().ticks, 0);
    }

    #[test]
    fn test_advance_zero_seconds_dispatches_without_time() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);
        assert!(!scheduler.advance(0.0).unwrap());
        assert_eq!(scheduler.running().unwrap().id(), 1);
        assert_eq!(scheduler.elapsed(), 0.0);
    }

    #[test]
    fn test_work_boundary_on_900th_tick() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);

        assert_eq!(drive(&mut scheduler, 899), 0);
        assert!(scheduler.advance(1.0).unwrap());
        assert_eq!(scheduler.phase(), Phase::Working);
        assert_eq!(scheduler.elapsed(), 900.0);
        assert_eq!(scheduler.pending_transition(), Transition::EnterSwitch);
    }

    #[test]
    fn test_advance_never_changes_phase() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);
        drive(&mut scheduler, 905);
        assert_eq!(scheduler.phase(), Phase::Working);
        assert_eq!(scheduler.elapsed(), 905.0);
    }

    #[test]
    fn test_start_switch_keeps_task_running() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        drive(&mut scheduler, 900);
        scheduler.start_switch();

        assert_eq!(scheduler.phase(), Phase::Switching);
        assert_eq!(scheduler.elapsed(), 0.0);
        assert_eq!(scheduler.running().unwrap().id(), 1);
        assert_eq!(scheduler.location(1), Some(Location::Running));
    }

    #[test]
    fn test_context_switch_requeues_at_tail() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        scheduler.advance(1.0).unwrap();
        scheduler.start_switch();
        scheduler.context_switch();

        assert_eq!(scheduler.running().unwrap().id(), 2);
        let ready: Vec<TaskId> = scheduler.ready().map(|t| t.id()).collect();
        assert_eq!(ready, vec![REST_TASK_ID, 1]);
        assert_eq!(scheduler.phase(), Phase::Working);
        assert_eq!(scheduler.elapsed(), 0.0);
    }

    #[test]
    fn test_context_switch_without_runner_is_noop() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);
        scheduler.context_switch();
        assert!(scheduler.running().is_none());
        assert_eq!(scheduler.ready().count(), 2);
    }

    #[test]
    fn test_dispatch_rest_enters_resting() {
        let mut scheduler = InterleavingScheduler::default();
        assert_eq!(scheduler.dispatch_next(), Some(REST_TASK_ID));
        assert_eq!(scheduler.phase(), Phase::Resting);
        assert_eq!(scheduler.dispatch_next(), None);
    }

    #[test]
    fn test_switching_time_charged_to_running_task() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);
        drive(&mut scheduler, 900);
        scheduler.start_switch();
        drive(&mut scheduler, 30);

        let task = scheduler.task(1).unwrap();
        assert_eq!(task.total_seconds(), 930.0);
        assert_eq!(task.ledger().switching, 30.0);
        assert_eq!(task.logged_seconds(), 900.0);
    }

    #[test]
    fn test_tick_applies_transitions() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);

        for _ in 0..899 {
            assert_eq!(scheduler.tick(1.0).unwrap(), Transition::None);
        }
        assert_eq!(scheduler.tick(1.0).unwrap(), Transition::EnterSwitch);
        assert_eq!(scheduler.phase(), Phase::Switching);

        for _ in 0..59 {
            assert_eq!(scheduler.tick(1.0).unwrap(), Transition::None);
        }
        assert_eq!(scheduler.tick(1.0).unwrap(), Transition::Cycle);
        assert_eq!(scheduler.phase(), Phase::Resting);
        assert_eq!(scheduler.running().unwrap().id(), REST_TASK_ID);
    }

    #[test]
    fn test_large_tick_crosses_in_one_step() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);
        assert_eq!(scheduler.tick(1000.0).unwrap(), Transition::EnterSwitch);
        assert_eq!(scheduler.elapsed(), 0.0);
        assert_eq!(scheduler.task(1).unwrap().total_seconds(), 1000.0);
    }

    #[test]
    fn test_complete_running_dispatches_next() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        scheduler.advance(120.0).unwrap();
        scheduler.complete_task(1).unwrap();

        assert_eq!(scheduler.running().unwrap().id(), 2);
        assert_eq!(scheduler.elapsed(), 0.0);
        assert_eq!(scheduler.phase(), Phase::Working);
        assert_eq!(scheduler.location(1), Some(Location::Halted));
        assert_eq!(scheduler.halted().next().unwrap().total_seconds(), 120.0);
    }

    #[test]
    fn test_complete_during_switch_skips_buffer() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        scheduler.advance(900.0).unwrap();
        scheduler.start_switch();
        scheduler.complete_task(1).unwrap();

        assert_eq!(scheduler.phase(), Phase::Working);
        assert_eq!(scheduler.running().unwrap().id(), 2);
    }

    #[test]
    fn test_complete_ready_has_no_dispatch_side_effect() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab", "Anki"]);
        scheduler.advance(10.0).unwrap();
        scheduler.complete_task(3).unwrap();

        assert_eq!(scheduler.running().unwrap().id(), 1);
        assert_eq!(scheduler.elapsed(), 10.0);
        let ready: Vec<TaskId> = scheduler.ready().map(|t| t.id()).collect();
        assert_eq!(ready, vec![2, REST_TASK_ID]);
    }

    #[test]
    fn test_complete_rejections_leave_state_untouched() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        scheduler.advance(10.0).unwrap();
        scheduler.complete_task(2).unwrap();
        let before = scheduler.snapshot();

        assert_eq!(
            scheduler.complete_task(2),
            Err(SchedulerError::AlreadyHalted(2))
        );
        assert_eq!(scheduler.complete_task(77), Err(SchedulerError::NotFound(77)));
        assert!(matches!(
            scheduler.complete_task(REST_TASK_ID),
            Err(SchedulerError::InvalidOperation(_))
        ));

        assert_eq!(scheduler.snapshot(), before);
        assert_eq!(scheduler.stats().completions, 1);
    }

    #[test]
    fn test_complete_by_name() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        assert_eq!(scheduler.complete_by_name("Vocab"), Ok(2));
        assert_eq!(
            scheduler.complete_by_name("Vocab"),
            Err(SchedulerError::NameNotFound("Vocab".into()))
        );
        assert_eq!(
            scheduler.complete_by_name("Gym"),
            Err(SchedulerError::NameNotFound("Gym".into()))
        );
        assert!(scheduler
            .complete_by_name(crate::core::limits::REST_TASK_NAME)
            .is_err());
    }

    #[test]
    fn test_dispatch_next_keeps_occupied_slot() {
        let mut scheduler = InterleavingScheduler::new(["A", "B"]);
        scheduler.advance(1.0).unwrap();
        let before = scheduler.snapshot();

        assert_eq!(scheduler.dispatch_next(), None);
        assert_eq!(scheduler.snapshot(), before);
        assert_eq!(scheduler.queue_lens(), (2, 1, 0));
        assert_eq!(scheduler.location(1), Some(Location::Running));
        assert_eq!(scheduler.stats().dispatches, 1);

        // Runner index stays consistent, so completion still hands off to B
        scheduler.complete_task(1).unwrap();
        assert_eq!(scheduler.running().unwrap().id(), 2);
        assert_eq!(scheduler.queue_lens(), (1, 1, 1));
    }

    #[test]
    fn test_rest_cycles_onto_itself_when_alone() {
        let mut scheduler = InterleavingScheduler::new(["Lab"]);
        scheduler.advance(1.0).unwrap();
        scheduler.complete_task(1).unwrap();

        // Rest task now running; let it finish and cycle back onto itself
        assert_eq!(scheduler.running().unwrap().id(), REST_TASK_ID);
        assert_eq!(scheduler.tick(900.0).unwrap(), Transition::Cycle);
        assert_eq!(scheduler.running().unwrap().id(), REST_TASK_ID);
        assert_eq!(scheduler.phase(), Phase::Resting);
        assert!(!scheduler.has_pending_work());
    }
}
