/*!
 * Driver Configuration
 * Tick cadence, task list location and output toggles, read from
 * INTERLEAVE_* environment variables
 */

use crate::core::errors::{AppError, Result};
use crate::core::limits::{
    DEFAULT_RENDER_EVERY, DEFAULT_SECONDS_PER_TICK, DEFAULT_TASKS_PATH, DEFAULT_TICK_MILLIS,
};
use crate::core::types::Seconds;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_TASKS_PATH: &str = "INTERLEAVE_TASKS_PATH";
pub const ENV_SECONDS_PER_TICK: &str = "INTERLEAVE_SECONDS_PER_TICK";
pub const ENV_TICK_MILLIS: &str = "INTERLEAVE_TICK_MILLIS";
pub const ENV_MAX_TICKS: &str = "INTERLEAVE_MAX_TICKS";
pub const ENV_RENDER_EVERY: &str = "INTERLEAVE_RENDER_EVERY";
pub const ENV_BELL: &str = "INTERLEAVE_BELL";

/// Driver settings; phase lengths are fixed and not configurable
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub tasks_path: PathBuf,
    /// Virtual seconds added on every tick
    pub seconds_per_tick: Seconds,
    /// Real time between ticks
    pub tick_interval: Duration,
    /// Stop after this many ticks (headless runs)
    pub max_ticks: Option<u64>,
    /// Render the board every N ticks; 0 disables periodic renders
    pub render_every: u64,
    /// Ring the terminal bell on phase boundaries
    pub bell: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tasks_path: PathBuf::from(DEFAULT_TASKS_PATH),
            seconds_per_tick: DEFAULT_SECONDS_PER_TICK,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
            max_ticks: None,
            render_every: DEFAULT_RENDER_EVERY,
            bell: true,
        }
    }
}

impl DriverConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seconds_per_tick = parse_or(&lookup, ENV_SECONDS_PER_TICK, defaults.seconds_per_tick)?;
        if !seconds_per_tick.is_finite() || seconds_per_tick < 0.0 {
            return Err(AppError::Configuration(format!(
                "{} must be a finite, non-negative number (got {})",
                ENV_SECONDS_PER_TICK, seconds_per_tick
            )));
        }

        let tick_millis: u64 = parse_or(&lookup, ENV_TICK_MILLIS, DEFAULT_TICK_MILLIS)?;
        if tick_millis == 0 {
            return Err(AppError::Configuration(format!(
                "{} must be at least 1",
                ENV_TICK_MILLIS
            )));
        }

        let max_ticks = match lookup(ENV_MAX_TICKS) {
            Some(raw) => Some(parse_value(ENV_MAX_TICKS, &raw)?),
            None => None,
        };

        let bell = match lookup(ENV_BELL) {
            Some(raw) => parse_flag(ENV_BELL, &raw)?,
            None => defaults.bell,
        };

        Ok(Self {
            tasks_path: lookup(ENV_TASKS_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.tasks_path),
            seconds_per_tick,
            tick_interval: Duration::from_millis(tick_millis),
            max_ticks,
            render_every: parse_or(&lookup, ENV_RENDER_EVERY, defaults.render_every)?,
            bell,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("{} has invalid value '{}'", key, raw)))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Configuration(format!(
            "{} has invalid value '{}'",
            key, raw
        ))),
    }
}
