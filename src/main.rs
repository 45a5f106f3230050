//! Pomodoro Timer CLI - an interactive terminal Pomodoro timer
//!
//! Alternates focused work sessions and breaks:
//! - 25 minutes of focused work (adjustable)
//! - 5 minutes of break (adjustable)
//! - A desktop notification and a sound cue at every transition

use anyhow::Result;
use clap::CommandFactory;

use pomodoro_timer::cli::{run_session, Cli, Commands, Display};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse_checked();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the `--json` stream on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(*shell);
        }
        Some(Commands::Run(_)) | None => {
            if let Some(args) = cli.run_args() {
                let config = args.to_config()?;
                run_session(config).await?;
            }
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_checked_from(["pomodoro"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.run_args().is_some());
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::try_parse_checked_from(["pomodoro", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::try_parse_checked_from(["pomodoro", "--verbose", "run"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
