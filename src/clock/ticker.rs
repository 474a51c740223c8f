//! TickerClock: real-time timers backed by ticker threads.
//!
//! Each scheduled timer gets a dedicated thread that sends its
//! [`TimerHandle`] on a shared channel at a fixed interval. The host
//! receives handles from [`TickerClock::receiver`] and hands them to the
//! engine, so every engine mutation still happens on the host thread.

use super::{Clock, TimerHandle};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One running ticker thread.
struct Ticker {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl Ticker {
    /// Signal the ticker to stop and wait for its thread.
    fn join(mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Real-time clock delivering firings over a crossbeam channel.
pub struct TickerClock {
    tick_tx: Sender<TimerHandle>,
    tick_rx: Receiver<TimerHandle>,
    tickers: HashMap<TimerHandle, Ticker>,
    next_id: u64,
}

impl TickerClock {
    /// Create a clock with no timers.
    pub fn new() -> Self {
        // Small buffer: a slow receiver skips firings instead of queueing them
        let (tick_tx, tick_rx) = bounded(16);
        Self {
            tick_tx,
            tick_rx,
            tickers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Get the receiver of timer firings.
    ///
    /// Firings of timers cancelled after sending may still be in flight;
    /// the engine ignores handles it no longer owns.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<TimerHandle> {
        &self.tick_rx
    }

    /// Number of running ticker threads.
    pub fn active_timers(&self) -> usize {
        self.tickers.len()
    }

    /// Main ticker loop.
    fn run_loop(
        handle: TimerHandle,
        tick_tx: &Sender<TimerHandle>,
        shutdown: &AtomicBool,
        interval: Duration,
    ) {
        let mut next_tick = Instant::now() + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                // Non-blocking send - if buffer is full, skip this tick
                let _ = tick_tx.try_send(handle);

                next_tick += interval;

                // Handle case where we're behind (catch up without queuing)
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                // Sleep in short slices so shutdown stays responsive
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }
    }
}

impl Default for TickerClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickerClock {
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let tick_tx = self.tick_tx.clone();

        let thread = thread::Builder::new()
            .name(format!("typewriter-ticker-{}", handle.0))
            .spawn(move || {
                Self::run_loop(handle, &tick_tx, &shutdown_clone, period);
            })
            .expect("Failed to spawn ticker thread");

        tracing::trace!(timer = handle.0, period_ms = period.as_millis(), "ticker spawned");
        self.tickers.insert(
            handle,
            Ticker {
                handle: Some(thread),
                shutdown,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(ticker) = self.tickers.remove(&handle) {
            ticker.join();
            tracing::trace!(timer = handle.0, "ticker joined");
        }
    }
}

impl Drop for TickerClock {
    fn drop(&mut self) {
        for (_, ticker) in self.tickers.drain() {
            ticker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_basic() {
        let mut clock = TickerClock::new();
        let handle = clock.schedule_repeating(Duration::from_millis(10));

        // Should receive ticks
        let tick = clock.receiver().recv_timeout(Duration::from_millis(200));
        assert_eq!(tick.ok(), Some(handle));

        // Second tick
        let tick2 = clock.receiver().recv_timeout(Duration::from_millis(200));
        assert!(tick2.is_ok());

        clock.cancel(handle);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_ticker_cancel_stops_firing() {
        let mut clock = TickerClock::new();
        let handle = clock.schedule_repeating(Duration::from_millis(5));
        clock.cancel(handle);

        // Drain anything sent before the cancel landed
        while clock.receiver().try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(clock.receiver().try_recv().is_err());
    }

    #[test]
    fn test_two_timers_share_channel() {
        let mut clock = TickerClock::new();
        let a = clock.schedule_repeating(Duration::from_millis(5));
        let b = clock.schedule_repeating(Duration::from_millis(7));

        let mut seen_a = false;
        let mut seen_b = false;
        let deadline = Instant::now() + Duration::from_secs(2);
        while !(seen_a && seen_b) && Instant::now() < deadline {
            match clock.receiver().recv_timeout(Duration::from_millis(100)) {
                Ok(h) if h == a => seen_a = true,
                Ok(h) if h == b => seen_b = true,
                _ => {}
            }
        }
        assert!(seen_a && seen_b);
    }
}
