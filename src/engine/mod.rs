//! Engine module: configuration, progress tracking, caret blinking and
//! the [`Typewriter`] state machine itself.

mod caret;
mod config;
#[allow(clippy::module_inception)]
mod engine;
mod progress;

pub use caret::CaretBlink;
pub use config::{
    clamp_speed, tick_period, EngineConfig, CARET_TOGGLE_TIME, MAX_SPEED, MAX_SPEED_TIME,
    MIN_SPEED,
};
pub use engine::{EngineState, Typewriter};
pub use progress::{delay_ticks, ActiveCommand, Progress, StepKind};
