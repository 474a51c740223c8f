//! Clock module: repeating-timer sources that drive the engine.
//!
//! The engine never sleeps or spawns anything itself. It asks a [`Clock`]
//! for repeating timers and the host delivers each firing back through
//! [`Typewriter::on_timer`](crate::Typewriter::on_timer).
//!
//! - [`ManualClock`]: virtual time, advanced explicitly (tests, headless runs)
//! - [`TickerClock`]: one ticker thread per timer, firings over a channel

mod manual;
mod ticker;

pub use manual::ManualClock;
pub use ticker::TickerClock;

use std::time::Duration;

/// Handle identifying one scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// A source of repeating timers.
pub trait Clock {
    /// Schedule a timer that fires every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Cancel a timer. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}
