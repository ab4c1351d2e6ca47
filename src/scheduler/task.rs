/*!
 * Scheduler Task Entity
 * Identity plus a per-phase ledger of virtual seconds spent running
 */

use super::phase::Phase;
use crate::core::limits::{REST_TASK_ID, REST_TASK_NAME};
use crate::core::types::{Seconds, TaskId};
use serde::{Deserialize, Serialize};

/// Seconds a task spent at the head of `running`, split by phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhaseLedger {
    pub working: Seconds,
    pub switching: Seconds,
    pub resting: Seconds,
}

impl PhaseLedger {
    #[inline]
    pub fn record(&mut self, phase: Phase, seconds: Seconds) {
        match phase {
            Phase::Working => self.working += seconds,
            Phase::Switching => self.switching += seconds,
            Phase::Resting => self.resting += seconds,
        }
    }

    /// Seconds across every phase, switch buffers included
    #[inline]
    pub fn total(&self) -> Seconds {
        self.working + self.switching + self.resting
    }

    /// Focus time: work and rest, without switch buffers
    #[inline]
    pub fn logged(&self) -> Seconds {
        self.working + self.resting
    }
}

/// A unit of work in the interleaving rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    name: String,
    is_rest: bool,
    ledger: PhaseLedger,
}

impl Task {
    /// Create an ordinary task
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_rest: false,
            ledger: PhaseLedger::default(),
        }
    }

    /// Create the recharge pseudo-task
    pub fn rest() -> Self {
        Self {
            id: REST_TASK_ID,
            name: REST_TASK_NAME.to_string(),
            is_rest: true,
            ledger: PhaseLedger::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_rest(&self) -> bool {
        self.is_rest
    }

    /// Cumulative seconds in the running slot, in any phase
    #[inline]
    pub fn total_seconds(&self) -> Seconds {
        self.ledger.total()
    }

    /// Seconds spent working or resting, excluding switch buffers
    #[inline]
    pub fn logged_seconds(&self) -> Seconds {
        self.ledger.logged()
    }

    #[inline]
    pub fn ledger(&self) -> &PhaseLedger {
        &self.ledger
    }

    pub(super) fn accumulate(&mut self, phase: Phase, seconds: Seconds) {
        self.ledger.record(phase, seconds);
    }
}
