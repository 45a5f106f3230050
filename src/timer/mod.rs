//! Timer engine and the loop that drives it.
//!
//! - `engine`: the state machine (`TimerEngine`) and its `Transition` results
//! - `ticker`: the armable one-second tick source
//! - `runtime`: the `tokio::select!` loop feeding commands and ticks to the engine

mod engine;
mod runtime;
mod ticker;

pub use engine::{TimerEngine, Transition};
pub use runtime::{Command, TimerRuntime, TimerUpdate, UpdateSource};
pub use ticker::{Ticker, TICK_INTERVAL};
