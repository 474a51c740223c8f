//! ManualClock: deterministic virtual time.

use super::{Clock, TimerHandle};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    period: Duration,
    next_due: Duration,
}

/// A clock whose time only moves when told to.
///
/// A timer scheduled at virtual time `t` with period `p` fires at
/// `t + p`, `t + 2p`, and so on. Timers due at the same instant fire in
/// the order they were scheduled.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, ManualTimer>,
}

impl ManualClock {
    /// Create a clock at virtual time zero.
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Check if a timer is still scheduled.
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }

    /// Number of scheduled timers.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// The earliest pending firing, if any.
    pub fn next_due(&self) -> Option<(Duration, TimerHandle)> {
        self.timers
            .iter()
            .min_by_key(|(id, timer)| (timer.next_due, **id))
            .map(|(id, timer)| (timer.next_due, TimerHandle(*id)))
    }

    /// Fire the earliest timer due at or before `deadline`.
    ///
    /// Virtual time jumps to the firing instant and the timer is
    /// rescheduled one period later. Returns `None` when nothing is due.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<TimerHandle> {
        let (due, handle) = self.next_due().filter(|(due, _)| *due <= deadline)?;
        self.now = self.now.max(due);
        if let Some(timer) = self.timers.get_mut(&handle.0) {
            timer.next_due += timer.period;
        }
        Some(handle)
    }

    /// Move virtual time forward without firing anything.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

impl Clock for ManualClock {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        let period = period.max(Duration::from_nanos(1));
        let id = self.next_id;
        self.next_id += 1;
        self.timers.insert(
            id,
            ManualTimer {
                period,
                next_due: self.now + period,
            },
        );
        TimerHandle(id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_in_chronological_order() {
        let mut clock = ManualClock::new();
        let fast = clock.schedule_repeating(MS * 10);
        let slow = clock.schedule_repeating(MS * 25);

        let mut fired = Vec::new();
        while let Some(handle) = clock.fire_next(MS * 50) {
            fired.push((clock.now(), handle));
        }

        assert_eq!(
            fired,
            vec![
                (MS * 10, fast),
                (MS * 20, fast),
                (MS * 25, slow),
                (MS * 30, fast),
                (MS * 40, fast),
                (MS * 50, fast),
                (MS * 50, slow),
            ]
        );
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut clock = ManualClock::new();
        let handle = clock.schedule_repeating(MS * 10);
        assert!(clock.is_scheduled(handle));

        clock.cancel(handle);
        assert!(!clock.is_scheduled(handle));
        assert_eq!(clock.fire_next(MS * 100), None);

        // Cancelling twice is harmless
        clock.cancel(handle);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_schedule_is_relative_to_now() {
        let mut clock = ManualClock::new();
        clock.advance_to(MS * 7);
        let handle = clock.schedule_repeating(MS * 5);
        assert_eq!(clock.next_due(), Some((MS * 12, handle)));
    }
}
