//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::config::{AppConfig, ConfigError, OutputMode, SoundConfig};
use crate::types::{TimerConfig, DEFAULT_BREAK_MINUTES, DEFAULT_SESSION_MINUTES};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - an interactive terminal Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "Interactive terminal Pomodoro timer",
    long_about = "Alternates work sessions and breaks in the foreground of your terminal.\n\
                  Type commands (start, pause, restart, s+/s-, b+/b-) and press Enter; \
                  type `help` for the full list.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Ids of the top-level `RunArgs` options.
const RUN_ARG_IDS: [&str; 7] = [
    "session",
    "break_time",
    "no_sound",
    "no_notify",
    "start_sound",
    "end_sound",
    "json",
];

impl Cli {
    /// Parses `std::env::args_os`, exiting with clap's usage error on failure.
    #[must_use]
    pub fn parse_checked() -> Self {
        Self::try_parse_checked_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parses `args`, rejecting top-level timer options combined with a
    /// subcommand.
    ///
    /// Global flags such as `--verbose` are accepted anywhere.
    ///
    /// # Errors
    ///
    /// Returns a clap error for invalid arguments or for a timer option given
    /// before a subcommand (`pomodoro --json completions bash`).
    pub fn try_parse_checked_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command();
        let matches = command.try_get_matches_from_mut(args)?;

        if let Some(subcommand) = matches.subcommand_name() {
            let given = RUN_ARG_IDS
                .iter()
                .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine));
            if let Some(id) = given {
                return Err(command.error(
                    ErrorKind::ArgumentConflict,
                    format!(
                        "the argument '--{}' cannot be used with the '{}' subcommand",
                        id.replace('_', "-"),
                        subcommand
                    ),
                ));
            }
        }

        Self::from_arg_matches(&matches)
    }

    /// Returns the arguments of the timer session to run, if any.
    #[must_use]
    pub fn run_args(&self) -> Option<&RunArgs> {
        match &self.command {
            None => Some(&self.run),
            Some(Commands::Run(args)) => Some(args),
            Some(Commands::Completions { .. }) => None,
        }
    }
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer (default)
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Arguments for an interactive timer session
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Initial session length in minutes
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SESSION_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub session: u32,

    /// Initial break length in minutes
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BREAK_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub break_time: u32,

    /// Disable audio cues
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications (terminal messages are still printed)
    #[arg(long)]
    pub no_notify: bool,

    /// Audio file played when a session starts
    #[arg(long, value_name = "PATH")]
    pub start_sound: Option<PathBuf>,

    /// Audio file played when a session or break ends
    #[arg(long, value_name = "PATH")]
    pub end_sound: Option<PathBuf>,

    /// Print one JSON object per update instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            session: DEFAULT_SESSION_MINUTES,
            break_time: DEFAULT_BREAK_MINUTES,
            no_sound: false,
            no_notify: false,
            start_sound: None,
            end_sound: None,
            json: false,
        }
    }
}

impl RunArgs {
    /// Builds and validates the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a length is below one minute or a sound file
    /// cannot be used.
    pub fn to_config(&self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            timer: TimerConfig::default()
                .with_session_minutes(self.session)
                .with_break_minutes(self.break_time),
            sound: SoundConfig {
                enabled: !self.no_sound,
                start_file: self.start_sound.clone(),
                end_file: self.end_sound.clone(),
            },
            desktop_notifications: !self.no_notify,
            output: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Human
            },
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
