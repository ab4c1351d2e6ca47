/*!
 * Driver Commands
 * Line-oriented requests read from stdin between ticks
 */

use crate::core::types::TaskId;

/// Which task a completion request points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(TaskId),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mark a task completed
    Done(Target),
    /// Print the board
    Status,
    /// Print scheduler counters as JSON
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "commands: done <id|name>, status, stats, help, quit";

impl Command {
    /// Parse one input line
    ///
    /// `done 3` targets an id; anything after `done` that is not a number is
    /// taken as a task name verbatim.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "done" | "complete" | "d" => {
                if rest.is_empty() {
                    return Err("done needs a task id or name".to_string());
                }
                let target = match rest.parse::<TaskId>() {
                    Ok(id) => Target::Id(id),
                    Err(_) => Target::Name(rest.to_string()),
                };
                Ok(Self::Done(target))
            }
            "status" | "s" | "" => Ok(Self::Status),
            "stats" => Ok(Self::Stats),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}'; {}", other, HELP)),
        }
    }
}
