/*!
 * Scheduler Driver
 * Owns the scheduler, feeds it ticks, rings the notifier on boundaries and
 * applies completion requests between ticks
 */

use crate::core::errors::{SchedulerResult, SerializableError};
use crate::core::types::Seconds;
use crate::display::render_board;
use crate::scheduler::{InterleavingScheduler, Transition};
use tracing::{info, warn};

mod command;
mod notify;

pub use command::{Command, Target, HELP};
pub use notify::{Bell, Notifier, Silent};

/// Result of handling one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running; print the reply if there is one
    Continue(Option<String>),
    Quit,
}

/// Single owner of the scheduler for the whole session
pub struct Driver<N: Notifier> {
    scheduler: InterleavingScheduler,
    notifier: N,
    seconds_per_tick: Seconds,
    ticks: u64,
}

impl<N: Notifier> Driver<N> {
    pub fn new(scheduler: InterleavingScheduler, notifier: N, seconds_per_tick: Seconds) -> Self {
        Self {
            scheduler,
            notifier,
            seconds_per_tick,
            ticks: 0,
        }
    }

    /// Run one tick, applying and announcing any transition
    pub fn step(&mut self) -> SchedulerResult<Transition> {
        let transition = self.scheduler.tick(self.seconds_per_tick)?;
        self.ticks += 1;

        if transition.is_boundary() {
            let phase = self.scheduler.phase();
            info!(
                ?transition,
                %phase,
                task = self.scheduler.running().map(|t| t.name()),
                "Phase boundary"
            );
            self.notifier.notify(transition, phase);
        }
        Ok(transition)
    }

    /// Apply one line of user input
    pub fn handle_command(&mut self, line: &str) -> Outcome {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(msg) => return Outcome::Continue(Some(msg)),
        };

        match command {
            Command::Quit => Outcome::Quit,
            Command::Help => Outcome::Continue(Some(HELP.to_string())),
            Command::Status => Outcome::Continue(Some(self.board())),
            Command::Stats => Outcome::Continue(Some(self.stats_json())),
            Command::Done(target) => Outcome::Continue(Some(self.complete(target))),
        }
    }

    fn complete(&mut self, target: Target) -> String {
        let result = match &target {
            Target::Id(id) => self.scheduler.complete_task(*id).map(|()| *id),
            Target::Name(name) => self.scheduler.complete_by_name(name),
        };

        match result {
            Ok(id) => {
                let name = self.scheduler.task(id).map(|t| t.name()).unwrap_or_default();
                format!("completed [{}] {}", id, name)
            }
            Err(err) => {
                warn!(?target, error = %err, "Completion rejected");
                let report = SerializableError::from(err);
                format!("error ({}): {}", report.error_type, report.message)
            }
        }
    }

    /// Current board as text
    pub fn board(&self) -> String {
        render_board(&self.scheduler.snapshot())
    }

    /// Scheduler counters as pretty JSON
    pub fn stats_json(&self) -> String {
        serde_json::to_string_pretty(&self.scheduler.stats())
            .unwrap_or_else(|e| format!("stats unavailable: {}", e))
    }

    /// Ticks driven so far, including no-op ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scheduler(&self) -> &InterleavingScheduler {
        &self.scheduler
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
