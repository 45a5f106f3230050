//! Parsing of the line-based commands typed while the timer runs.

use crate::timer::Command;
use crate::types::Direction;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward to the timer runtime
    Command(Command),
    /// Show the key help
    Help,
    /// End the session
    Quit,
    /// Blank line
    Empty,
    /// Anything else, trimmed
    Unknown(String),
}

/// Parses one input line. Case and surrounding whitespace are ignored.
pub fn parse_input(line: &str) -> Input {
    let normalized = line
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match normalized.as_str() {
        "" => Input::Empty,
        "s" | "start" => Input::Command(Command::Start),
        "p" | "pause" => Input::Command(Command::Pause),
        "r" | "restart" => Input::Command(Command::Restart),
        "b+" | "break up" => Input::Command(Command::AdjustBreak(Direction::Increment)),
        "b-" | "break down" => Input::Command(Command::AdjustBreak(Direction::Decrement)),
        "s+" | "session up" => Input::Command(Command::AdjustSession(Direction::Increment)),
        "s-" | "session down" => Input::Command(Command::AdjustSession(Direction::Decrement)),
        "t" | "status" => Input::Command(Command::Refresh),
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(line.trim().to_string()),
    }
}

/// Key help shown for `help`.
pub const HELP_TEXT: &str = "\
Commands:
  s, start          start or resume the countdown
  p, pause          pause the countdown
  r, restart        reset to an idle session (only while running)
  s+, session up    lengthen the session by one minute
  s-, session down  shorten the session by one minute
  b+, break up      lengthen the break by one minute
  b-, break down    shorten the break by one minute
  t, status         show the current state
  h, help, ?        show this help
  q, quit, exit     quit";
