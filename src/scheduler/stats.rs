/*!
 * Scheduler Statistics
 * Track and report scheduler activity counters
 */

use super::InterleavingScheduler;
use serde::{Deserialize, Serialize};

/// Scheduler activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Ticks that charged time to a running task
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub ticks: u64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub dispatches: u64,
    /// Switch buffers entered
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub switches: u64,
    /// Running tasks requeued at the tail of ready
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub context_switches: u64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub completions: u64,
    /// Ticks that ended at or past the phase limit
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub boundaries: u64,
}

#[inline]
fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

impl InterleavingScheduler {
    /// Get scheduler statistics
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
