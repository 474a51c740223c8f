//! Caret blink controller.
//!
//! Blinks on its own repeating timer while the engine sits idle with an
//! empty queue. Suspended (and forced visible) while commands are stepped.

use crate::clock::{Clock, TimerHandle};
use crate::error::Result;
use crate::surface::RenderSurface;
use std::time::Duration;

/// Caret blink state.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    period: Duration,
    timer: Option<TimerHandle>,
    visible: bool,
}

impl CaretBlink {
    /// Create a suspended controller with a visible caret.
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
            visible: true,
        }
    }

    /// Whether the blink timer is running.
    #[inline]
    pub const fn is_blinking(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether the caret is currently shown.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if `handle` is this controller's timer.
    #[inline]
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.timer == Some(handle)
    }

    /// Start blinking. No-op if already blinking.
    pub fn resume<C: Clock>(&mut self, clock: &mut C) {
        if self.timer.is_none() {
            let handle = clock.schedule_repeating(self.period);
            tracing::debug!(timer = handle.0, "caret blink resumed");
            self.timer = Some(handle);
        }
    }

    /// Stop blinking and force the caret visible.
    pub fn suspend<C: Clock, S: RenderSurface>(&mut self, clock: &mut C, surface: &mut S) -> Result<()> {
        if let Some(handle) = self.timer.take() {
            clock.cancel(handle);
            tracing::debug!(timer = handle.0, "caret blink suspended");
        }
        if !self.visible {
            self.visible = true;
            surface.set_caret_visible(true)?;
        }
        Ok(())
    }

    /// Flip visibility (one blink timer firing).
    pub fn toggle<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        self.visible = !self.visible;
        surface.set_caret_visible(self.visible)
    }
}
