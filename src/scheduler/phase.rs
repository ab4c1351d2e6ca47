/*!
 * Scheduler Phases
 * Phase definitions, per-phase limits and the transition decision table
 */

use crate::core::limits::{REST_LIMIT, SWITCH_LIMIT, WORK_LIMIT};
use crate::core::types::Seconds;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Phase of the interleaving cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Focused work on the running task
    #[default]
    Working,
    /// Short buffer after a work interval; the task stays in the running slot
    Switching,
    /// Long recharge while the rest task occupies the running slot
    Resting,
}

impl Phase {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "working" | "work" => Ok(Self::Working),
            "switching" | "switch" => Ok(Self::Switching),
            "resting" | "rest" => Ok(Self::Resting),
            _ => Err(format!(
                "Invalid phase '{}'. Valid: working, switching, resting",
                s
            )),
        }
    }

    /// Upper-case label shown in the board header
    ///
    /// # Performance
    /// Hot path - rendered on every board refresh
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "WORKING",
            Self::Switching => "SWITCHING",
            Self::Resting => "RESTING",
        }
    }

    /// Virtual seconds this phase lasts before a boundary is signaled
    #[inline(always)]
    pub const fn limit(&self) -> Seconds {
        match self {
            Self::Working => WORK_LIMIT,
            Self::Switching => SWITCH_LIMIT,
            Self::Resting => REST_LIMIT,
        }
    }

    /// Decision to apply once this phase has crossed its boundary
    ///
    /// Work always yields to a switch buffer first; switch and rest both
    /// resolve straight into the next dispatch.
    #[inline]
    pub const fn on_boundary(&self) -> Transition {
        match self {
            Self::Working => Transition::EnterSwitch,
            Self::Switching | Self::Resting => Transition::Cycle,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Phase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Phase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// What the state machine does after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// No boundary crossed
    None,
    /// Work interval over: enter the switch buffer, keep the task running
    EnterSwitch,
    /// Switch or rest over: requeue the running task and dispatch the next one
    Cycle,
}

impl Transition {
    #[inline]
    pub const fn is_boundary(&self) -> bool {
        !matches!(self, Self::None)
    }
}
