/*!
 * Scheduler Limits and Constants
 *
 * Fixed phase lengths and reserved identifiers. All durations are in virtual
 * seconds; the driver decides how fast virtual time passes.
 */

use super::types::{Seconds, TaskId};

// =============================================================================
// PHASE LIMITS
// =============================================================================

/// Focused work interval (15 minutes)
pub const WORK_LIMIT: Seconds = 15.0 * 60.0;

/// Buffer between two work intervals (1 minute)
pub const SWITCH_LIMIT: Seconds = 60.0;

/// Long recharge rest (15 minutes)
pub const REST_LIMIT: Seconds = 15.0 * 60.0;

// =============================================================================
// TASK IDENTITY
// =============================================================================

/// First id handed to an ordinary task; later tasks count up in input order,
/// stepping over the reserved rest id
pub const FIRST_TASK_ID: TaskId = 1;

/// Reserved id of the rest pseudo-task
pub const REST_TASK_ID: TaskId = 999;

/// Display label of the rest pseudo-task
pub const REST_TASK_NAME: &str = "RECHARGE (Big Rest)";


// =============================================================================
// DRIVER DEFAULTS
// =============================================================================

/// Task list read at startup when no path is configured
pub const DEFAULT_TASKS_PATH: &str = "tasks.txt";

/// Names seeded into a missing task list
pub const DEFAULT_TASK_NAMES: [&str; 4] = [
    "CSE 325 Lab",
    "CSE 335 C++ Project",
    "Spanish Vocab",
    "Japanese N5 Anki",
];

/// Virtual seconds added per tick (one virtual second per frame)
pub const DEFAULT_SECONDS_PER_TICK: Seconds = 1.0;

/// Real milliseconds between ticks (~60 ticks per second)
pub const DEFAULT_TICK_MILLIS: u64 = 16;

/// Ticks between two board renders
pub const DEFAULT_RENDER_EVERY: u64 = 60;
