/*!
 * Core Types
 * Common types used across the scheduler, loader and driver
 */

/// Task identifier, unique within one scheduler instance
pub type TaskId = u32;

/// Virtual seconds, advanced by the driver at whatever cadence it chooses
pub type Seconds = f64;

/// Format whole virtual seconds as `MM:SS`
///
/// Fractional seconds are truncated, minutes are not wrapped into hours.
#[inline]
pub fn format_clock(seconds: Seconds) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Format whole virtual seconds as `Xm Ys`
#[inline]
pub fn format_logged(seconds: Seconds) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}m {}s", whole / 60, whole % 60)
}
