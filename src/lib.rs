/*!
 * Interleave Library
 * Interleaving work/switch/rest scheduler with a headless driver
 */

pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod loader;
pub mod monitoring;
pub mod scheduler;

// Re-exports
pub use config::DriverConfig;
pub use crate::core::errors::{AppError, Result, SchedulerError, SchedulerResult, SerializableError};
pub use crate::core::types::{Seconds, TaskId};
pub use display::render_board;
pub use driver::{Bell, Driver, Notifier, Outcome, Silent};
pub use loader::load_task_names;
pub use monitoring::init_tracing;
pub use scheduler::{
    InterleavingScheduler, Location, Phase, SchedulerSnapshot, SchedulerStats, Task, TaskView,
    Transition,
};
