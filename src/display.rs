/*!
 * Text Board
 * Renders a scheduler snapshot as a header timer and three queue columns
 */

use crate::core::types::{format_clock, format_logged};
use crate::scheduler::{SchedulerSnapshot, TaskView};
use std::fmt::Write;

pub const READY_TITLE: &str = "READY QUEUE";
pub const RUNNING_TITLE: &str = "CURRENT ACTION";
pub const HALTED_TITLE: &str = "COMPLETED";

/// Header line, e.g. `WORKING: 03:25`
pub fn render_header(snapshot: &SchedulerSnapshot) -> String {
    format!("{}: {}", snapshot.phase, format_clock(snapshot.elapsed))
}

/// One task card, e.g. `[1] Spanish Vocab  Logged: 3m 20s`
pub fn render_card(task: &TaskView) -> String {
    format!(
        "[{}] {}  Logged: {}",
        task.id,
        task.name,
        format_logged(task.total_seconds)
    )
}

/// Full board: header, then ready, running and completed sections
pub fn render_board(snapshot: &SchedulerSnapshot) -> String {
    let header = render_header(snapshot);
    let rule = "=".repeat(header.len().max(40));

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{rule}\n{header}\n{rule}");
    write_section(&mut out, READY_TITLE, snapshot.ready.iter());
    write_section(&mut out, RUNNING_TITLE, snapshot.running.iter());
    write_section(&mut out, HALTED_TITLE, snapshot.halted.iter());
    out
}

fn write_section<'a>(out: &mut String, title: &str, tasks: impl Iterator<Item = &'a TaskView>) {
    let _ = writeln!(out, "{title}");
    let mut empty = true;
    for task in tasks {
        empty = false;
        let _ = writeln!(out, "  {}", render_card(task));
    }
    if empty {
        let _ = writeln!(out, "  (none)");
    }
}
