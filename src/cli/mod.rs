//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Parsing of commands typed while the timer runs
//! - `display`: Output formatting and display logic
//! - `session`: Wiring of runtime, presenter and input for one session

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use input::{parse_input, Input};
pub use session::{run_session, Presenter};
