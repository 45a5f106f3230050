//! One-second tick source that can be armed and disarmed.

use std::future;

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Tick source driving [`TimerEngine::tick`](super::TimerEngine::tick).
///
/// While disarmed, [`Ticker::tick`] never resolves, so it can sit in a
/// `tokio::select!` branch unconditionally.
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    /// Creates a disarmed ticker.
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Returns true if ticks are being produced.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Starts producing ticks, the first one a full interval from now.
    ///
    /// Arming an armed ticker keeps the existing tick stream.
    pub fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
        debug!("ticker armed");
    }

    /// Stops producing ticks.
    pub fn disarm(&mut self) {
        if self.interval.take().is_some() {
            debug!("ticker disarmed");
        }
    }

    /// Arms or disarms to match whether the engine is running.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
