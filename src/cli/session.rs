//! Interactive session wiring.
//!
//! Three futures run concurrently on the current task:
//!
//! - the [`TimerRuntime`] loop
//! - the [`Presenter`], which renders updates and executes their effects
//! - the input forwarder, which turns stdin lines into runtime commands
//!
//! Quitting drops the command sender, which stops the runtime, which in turn
//! closes the update channel and ends the presenter.

use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::display::Display;
use super::input::{parse_input, Input};
use crate::config::AppConfig;
use crate::effects::EffectExecutor;
use crate::notification::{DesktopNotifier, NotificationSender};
use crate::sound::{try_create_player, SoundPlayer};
use crate::timer::{Command, TimerEngine, TimerRuntime, TimerUpdate};

// ============================================================================
// Presenter
// ============================================================================

/// Renders updates and executes their effects.
pub struct Presenter {
    display: Display,
    executor: EffectExecutor,
}

impl Presenter {
    pub fn new(display: Display, executor: EffectExecutor) -> Self {
        Self { display, executor }
    }

    /// Consumes updates until the runtime closes the channel, then waits for
    /// pending notifications.
    pub async fn run(self, mut updates_rx: mpsc::UnboundedReceiver<TimerUpdate>) {
        let Self { display, executor } = self;
        while let Some(update) = updates_rx.recv().await {
            display.show_update(&update);
            executor.execute(&update.effects);
        }
        display.close_line();
        executor.finish().await;
        debug!("presenter stopped");
    }
}

// ============================================================================
// Input
// ============================================================================

/// Forwards parsed input lines to the runtime until quit, end of input or
/// `shutdown` resolves.
///
/// The command sender is dropped on return.
pub async fn forward_input<F>(
    mut lines_rx: mpsc::UnboundedReceiver<String>,
    commands_tx: mpsc::UnboundedSender<Command>,
    display: Display,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines_rx.recv() => line,
            () = &mut shutdown => {
                info!("Interrupted, shutting down");
                break;
            }
        };

        let Some(line) = line else {
            debug!("input closed");
            break;
        };

        match parse_input(&line) {
            Input::Command(command) => {
                if commands_tx.send(command).is_err() {
                    warn!("Timer runtime is gone, dropping input");
                    break;
                }
            }
            Input::Help => display.show_help(),
            Input::Quit => break,
            Input::Empty => {}
            Input::Unknown(text) => display.show_unknown(&text),
        }
    }
}

/// Reads stdin lines on a dedicated thread.
///
/// The channel closes on end of input or a read error.
pub fn spawn_stdin_reader() -> Result<mpsc::UnboundedReceiver<String>> {
    let (lines_tx, lines_rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if lines_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
        })
        .context("Failed to spawn stdin reader")?;
    Ok(lines_rx)
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

// ============================================================================
// Session
// ============================================================================

/// Builds the effect executor for `config`.
///
/// Audio is opened only when sound is enabled; a missing device leaves the
/// executor without a player.
pub fn build_executor(config: &AppConfig) -> EffectExecutor {
    let sound_player = if config.sound.enabled {
        try_create_player().map(|player| player as Arc<dyn SoundPlayer>)
    } else {
        None
    };
    let notifier = config
        .desktop_notifications
        .then(|| Arc::new(DesktopNotifier::new()) as Arc<dyn NotificationSender>);

    EffectExecutor::new(sound_player, notifier, config.sound.clone())
}

/// Runs an interactive timer session on stdin/stdout until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the session could not
/// be set up.
pub async fn run_session(config: AppConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    info!(
        "Starting session ({}m session / {}m break)",
        config.timer.session_minutes, config.timer.break_minutes
    );

    let display = Display::new(config.output);
    let executor = build_executor(&config);
    let engine = TimerEngine::new(&config.timer);

    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (updates_tx, updates_rx) = mpsc::unbounded_channel();
    let runtime = TimerRuntime::new(engine, commands_rx, updates_tx);
    let presenter = Presenter::new(display.clone(), executor);
    let lines_rx = spawn_stdin_reader()?;

    display.show_banner();

    let (runtime_result, (), ()) = tokio::join!(
        runtime.run(),
        presenter.run(updates_rx),
        forward_input(lines_rx, commands_tx, display, ctrl_c()),
    );
    let engine = runtime_result?;
    debug!("final state: {:?}", engine.state());

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
