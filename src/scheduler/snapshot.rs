/*!
 * Scheduler Snapshot
 * Read-only, serializable view of phase, timer and queue contents
 */

use super::phase::Phase;
use super::task::Task;
use super::InterleavingScheduler;
use crate::core::types::{Seconds, TaskId};
use serde::{Deserialize, Serialize};

/// One task as a renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskView {
    pub id: TaskId,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_rest: bool,
    pub total_seconds: Seconds,
    pub logged_seconds: Seconds,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().to_string(),
            is_rest: task.is_rest(),
            total_seconds: task.total_seconds(),
            logged_seconds: task.logged_seconds(),
        }
    }
}

/// Point-in-time copy of everything a board needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerSnapshot {
    pub phase: Phase,
    pub elapsed: Seconds,
    pub limit: Seconds,
    pub ready: Vec<TaskView>,
    pub running: Option<TaskView>,
    pub halted: Vec<TaskView>,
}

impl InterleavingScheduler {
    /// Copy out the observable state; never mutates the scheduler
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            phase: self.phase,
            elapsed: self.elapsed,
            limit: self.limit(),
            ready: self.ready().map(TaskView::from).collect(),
            running: self.running().map(TaskView::from),
            halted: self.halted().map(TaskView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::limits::REST_TASK_ID;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        scheduler.advance(42.0).unwrap();

        let first = scheduler.snapshot();
        let second = scheduler.snapshot();
        assert_eq!(first, second);
        assert_eq!(scheduler.elapsed(), 42.0);
    }

    #[test]
    fn test_snapshot_contents() {
        let mut scheduler = InterleavingScheduler::new(["Lab", "Vocab"]);
        scheduler.advance(42.0).unwrap();
        scheduler.complete_task(2).unwrap();

        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.phase, Phase::Working);
        assert_eq!(snapshot.limit, 900.0);
        assert_eq!(snapshot.running.as_ref().map(|t| t.id), Some(1));
        assert_eq!(snapshot.running.as_ref().map(|t| t.total_seconds), Some(42.0));
        assert_eq!(
            snapshot.ready.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![REST_TASK_ID]
        );
        assert!(snapshot.ready[0].is_rest);
        assert_eq!(snapshot.halted[0].name, "Vocab");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let scheduler = InterleavingScheduler::new(["Lab"]);
        let json = serde_json::to_value(scheduler.snapshot()).unwrap();

        assert_eq!(json["phase"], "WORKING");
        assert_eq!(json["ready"][0]["name"], "Lab");
        assert!(json["ready"][0].get("is_rest").is_none());
        assert_eq!(json["ready"][1]["is_rest"], true);
        assert!(json["running"].is_null());
    }
}
