//! Typewriter: the fluent builder and the tick-driven state machine.
//!
//! Builder calls only append to the [`CommandQueue`]. Once started, a
//! repeating tick timer drives the engine; every tick performs exactly one
//! atomic step of the active command against the [`TextBuffer`] and the
//! [`RenderSurface`]. Timer firings reach the engine through
//! [`Typewriter::on_timer`], so the engine itself never sleeps or blocks.

use super::caret::CaretBlink;
use super::config::EngineConfig;
use super::progress::{ActiveCommand, StepKind};
use crate::buffer::{Direction, TextBuffer, Unit};
use crate::clock::{Clock, ManualClock, TickerClock, TimerHandle};
use crate::color::{Color, Gradient};
use crate::command::{Command, CommandQueue};
use crate::error::{Error, Result};
use crate::surface::RenderSurface;
use crossbeam_channel::RecvTimeoutError;
use std::io;
use std::time::{Duration, Instant};

/// Whether a command is currently being stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No command is active.
    Idle,
    /// The active command is being stepped one unit per tick.
    Running,
}

/// The typewriter animation engine.
///
/// # Example
///
/// ```rust
/// use typewriter::{ManualClock, MemorySurface, Typewriter};
///
/// let mut writer = Typewriter::new(MemorySurface::new(), ManualClock::new(), 60)?;
/// writer.type_text("hello", 0).move_by(-5, 100).start();
/// writer.run_until_stopped(1_000)?;
///
/// assert_eq!(writer.surface().text(), "hello");
/// assert_eq!(writer.buffer().cursor(), 0);
/// # Ok::<(), typewriter::Error>(())
/// ```
pub struct Typewriter<S: RenderSurface, C: Clock> {
    surface: S,
    clock: C,
    config: EngineConfig,
    /// Tick period derived from the configured speed.
    period: Duration,
    queue: CommandQueue,
    active: Option<ActiveCommand>,
    buffer: TextBuffer,
    gradient: Option<Gradient>,
    tick_timer: Option<TimerHandle>,
    caret: CaretBlink,
}

impl<S: RenderSurface, C: Clock> Typewriter<S, C> {
    /// Create an engine with the default configuration at `speed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the resulting configuration is
    /// unusable.
    pub fn new(surface: S, clock: C, speed: i32) -> Result<Self> {
        Self::with_config(surface, clock, EngineConfig::default().with_speed(speed))
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `config` fails validation.
    pub fn with_config(surface: S, clock: C, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let period = config.period();
        tracing::debug!(
            speed = config.speed,
            period_us = period.as_micros(),
            "typewriter created"
        );

        Ok(Self {
            surface,
            clock,
            caret: CaretBlink::new(config.caret_toggle),
            config,
            period,
            queue: CommandQueue::new(),
            active: None,
            buffer: TextBuffer::new(),
            gradient: None,
            tick_timer: None,
        })
    }

    /// Queue `text` for typing, then pause `delay_ms`.
    pub fn type_text(&mut self, text: &str, delay_ms: i64) -> &mut Self {
        self.queue.type_text(text, delay_ms);
        self
    }

    /// Queue several lines.
    ///
    /// Every line but the last is followed by a line break; the pause is
    /// taken once, after the first line.
    pub fn type_lines<T: AsRef<str>>(&mut self, lines: &[T], delay_ms: i64) -> &mut Self {
        self.queue.type_lines(lines, delay_ms);
        self
    }

    /// Queue a line break.
    pub fn new_line(&mut self, delay_ms: i64) -> &mut Self {
        self.queue.new_line(delay_ms);
        self
    }

    /// Queue a caret move of `offset` units (negative moves left).
    pub fn move_by(&mut self, offset: i64, delay_ms: i64) -> &mut Self {
        self.queue.move_by(offset, delay_ms);
        self
    }

    /// Queue a caret move to the start of the text.
    pub fn move_to_start(&mut self, delay_ms: i64) -> &mut Self {
        self.queue.move_by(Command::TO_START, delay_ms);
        self
    }

    /// Queue a caret move to the end of the text.
    pub fn move_to_end(&mut self, delay_ms: i64) -> &mut Self {
        self.queue.move_by(Command::TO_END, delay_ms);
        self
    }

    /// Queue a deletion of `offset` units (negative deletes left of the caret).
    pub fn delete(&mut self, offset: i64, delay_ms: i64) -> &mut Self {
        self.queue.delete(offset, delay_ms);
        self
    }

    /// Queue a pause.
    pub fn delay(&mut self, duration_ms: i64) -> &mut Self {
        self.queue.delay(duration_ms);
        self
    }

    /// Queue a gradient switch from color strings.
    ///
    /// Both colors are parsed now. Without `end`, the surface's base color
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Color`] naming the form that failed to parse.
    pub fn gradient(&mut self, start: &str, end: Option<&str>) -> Result<&mut Self> {
        let start = Color::parse(start)?;
        let end = end.map(Color::parse).transpose()?;
        self.gradient_colors(start, end)
    }

    /// Queue a gradient switch from parsed colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a channel is out of range.
    pub fn gradient_colors(&mut self, start: Color, end: Option<Color>) -> Result<&mut Self> {
        let end = end.unwrap_or_else(|| self.surface.base_color());
        for color in [start, end] {
            if !color.is_in_range() {
                return Err(Error::Validation(format!(
                    "gradient color {color} has a channel outside its range"
                )));
            }
        }
        self.queue.gradient(start, end);
        Ok(self)
    }

    /// Start the tick timer. Calling it while started does nothing.
    pub fn start(&mut self) -> &mut Self {
        if self.tick_timer.is_some() {
            tracing::debug!("typewriter already started");
            return self;
        }
        let handle = self.clock.schedule_repeating(self.period);
        self.tick_timer = Some(handle);
        tracing::debug!(timer = handle.0, queued = self.queue.len(), "typewriter started");
        self
    }

    /// Stop the animation and return to a quiet Idle state.
    ///
    /// Cancels the tick timer, discards the active and queued commands,
    /// resumes caret blinking and, if a gradient was active, clears it
    /// (reverting its colors when configured to). Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects a color revert.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(handle) = self.tick_timer.take() {
            self.clock.cancel(handle);
            tracing::debug!(
                timer = handle.0,
                discarded = self.queue.len(),
                "typewriter stopped"
            );
        }
        self.queue.clear();
        self.active = None;
        self.caret.resume(&mut self.clock);

        if self.gradient.take().is_some() && self.config.revert_gradient_on_stop {
            self.revert_gradient()?;
        }
        Ok(())
    }

    /// Handle one timer firing, then flush the surface.
    ///
    /// Firings of timers the engine no longer owns are ignored.
    ///
    /// # Errors
    ///
    /// Propagates invariant violations and surface failures.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Result<()> {
        let result = if self.tick_timer == Some(handle) {
            self.tick()
        } else if self.caret.owns(handle) {
            self.caret.toggle(&mut self.surface)
        } else {
            tracing::trace!(timer = handle.0, "ignoring stale timer");
            return Ok(());
        };

        if let Err(err) = &result {
            tracing::error!(timer = handle.0, error = %err, "timer callback failed");
        }
        result?;
        self.surface.flush()
    }

    /// Advance the state machine by one tick (without flushing).
    ///
    /// Idle: dequeue the next command, or stop if the queue is empty.
    /// Running: complete the active command if its progress reached the
    /// target, otherwise perform one step. A completed command leaves the
    /// engine Idle for the rest of the tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] if a step escapes the buffer;
    /// the active command is abandoned.
    pub fn tick(&mut self) -> Result<()> {
        if self.active.is_none() && !self.dequeue()? {
            return Ok(());
        }
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };

        if active.progress.is_done() {
            tracing::trace!(steps = active.progress.called, "command complete");
            return Ok(());
        }

        self.step(&active)?;
        active.progress.advance();
        self.active = Some(active);
        Ok(())
    }

    /// Pull commands until a tick-paced one is active.
    ///
    /// Gradients apply on the spot and never occupy a tick. Returns
    /// `false` when the queue ran dry and the engine stopped.
    fn dequeue(&mut self) -> Result<bool> {
        loop {
            let Some(command) = self.queue.pop() else {
                tracing::debug!("queue drained");
                self.stop()?;
                return Ok(false);
            };

            self.caret.suspend(&mut self.clock, &mut self.surface)?;
            tracing::trace!(kind = command.kind(), remaining = self.queue.len(), "dequeued");

            if let Command::Gradient { start, end } = command {
                self.enable_gradient(Gradient::new(start, end))?;
                continue;
            }
            self.active = ActiveCommand::begin(command, &self.buffer, self.period);
            return Ok(true);
        }
    }

    fn step(&mut self, active: &ActiveCommand) -> Result<()> {
        let called = active.progress.called;
        let direction = active.progress.direction;

        match &active.kind {
            StepKind::Type(graphemes) => {
                let grapheme = graphemes.get(called).ok_or(Error::InvariantViolation {
                    operation: "type step",
                    index: called,
                    len: graphemes.len(),
                })?;
                self.type_grapheme(grapheme)
            }
            StepKind::Move => {
                let cursor = self.buffer.step_cursor(direction)?;
                tracing::trace!(cursor, "moved");
                self.surface.move_caret(cursor)
            }
            StepKind::Delete => self.delete_one(direction),
            StepKind::Delay => Ok(()),
        }
    }

    fn type_grapheme(&mut self, grapheme: &str) -> Result<()> {
        let id = self.buffer.allocate_id();
        let mut unit = Unit::from_grapheme(id, grapheme);
        if self.gradient.is_some() {
            unit.make_colorizable();
        }

        let index = self.buffer.insert_at_cursor(unit)?;
        if let Some(unit) = self.buffer.get(index) {
            self.surface.insert_unit(index, unit)?;
        }
        tracing::trace!(index, grapheme, "typed");
        self.recolor_line(index)
    }

    /// Remove the unit left of the cursor (moving the cursor onto its
    /// slot) or the unit right of it (cursor stays).
    fn delete_one(&mut self, direction: Direction) -> Result<()> {
        let index = match direction {
            Direction::Left => self.buffer.step_cursor(Direction::Left)?,
            Direction::Right => self.buffer.cursor(),
        };
        let unit = self.buffer.remove(index)?;
        self.surface.remove_unit(index, &unit)?;
        tracing::trace!(index, "deleted");
        self.recolor_line(self.buffer.cursor())
    }

    /// Make every existing glyph colorizable and color the cursor's line.
    ///
    /// Other lines keep their current colors until they are next edited.
    fn enable_gradient(&mut self, gradient: Gradient) -> Result<()> {
        for unit in self.buffer.units_mut() {
            unit.make_colorizable();
        }
        self.gradient = Some(gradient);
        tracing::debug!(start = %gradient.start, end = %gradient.end, "gradient enabled");
        self.recolor_line(self.buffer.cursor())
    }

    /// Color every glyph on the line containing `index` by its position
    /// within that line.
    fn recolor_line(&mut self, index: usize) -> Result<()> {
        let Some(gradient) = self.gradient else {
            return Ok(());
        };
        let range = self.buffer.line_range(index);
        let len = range.len();

        for (offset, position) in range.enumerate() {
            let color = gradient.color_at(offset, len);
            let Some(unit) = self.buffer.get_mut(position) else {
                continue;
            };
            if unit.set_color(color) {
                self.surface.set_unit_color(position, unit, color)?;
            }
        }
        Ok(())
    }

    fn revert_gradient(&mut self) -> Result<()> {
        let base = self.surface.base_color();
        let mut reverted = 0usize;
        for (index, unit) in self.buffer.units_mut().enumerate() {
            if unit.is_colorizable() && unit.color() != Some(base) {
                unit.set_color(base);
                self.surface.set_unit_color(index, unit, base)?;
                reverted += 1;
            }
        }
        tracing::debug!(reverted, base = %base, "gradient reverted");
        Ok(())
    }

    /// Idle or Running.
    pub const fn state(&self) -> EngineState {
        if self.active.is_some() {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    /// Whether the tick timer is scheduled.
    pub const fn is_started(&self) -> bool {
        self.tick_timer.is_some()
    }

    /// Number of commands waiting in the queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// The queued commands in execution order.
    pub const fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// The text buffer.
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The render surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The render surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The caret blink controller.
    pub const fn caret(&self) -> &CaretBlink {
        &self.caret
    }

    /// The gradient currently applied to typed text, if any.
    pub const fn active_gradient(&self) -> Option<&Gradient> {
        self.gradient.as_ref()
    }

    /// The tick period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// The configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl<S: RenderSurface> Typewriter<S, ManualClock> {
    /// Move virtual time forward by `by`, dispatching every timer that
    /// falls due, in chronological order.
    ///
    /// Returns the number of firings dispatched.
    ///
    /// # Errors
    ///
    /// Stops at the first failing callback.
    pub fn advance(&mut self, by: Duration) -> Result<usize> {
        let deadline = self.clock.now() + by;
        let mut fired = 0;
        while let Some(handle) = self.clock.fire_next(deadline) {
            self.on_timer(handle)?;
            fired += 1;
        }
        self.clock.advance_to(deadline);
        Ok(fired)
    }

    /// Dispatch firings until the engine stops itself, or `max_ticks`
    /// ticks have run.
    ///
    /// Returns the number of ticks dispatched (caret firings in between
    /// are not counted).
    ///
    /// # Errors
    ///
    /// Stops at the first failing callback.
    pub fn run_until_stopped(&mut self, max_ticks: usize) -> Result<usize> {
        let mut ticks = 0;
        while ticks < max_ticks {
            let Some(tick_timer) = self.tick_timer else {
                break;
            };
            let Some((due, _)) = self.clock.next_due() else {
                break;
            };
            let Some(handle) = self.clock.fire_next(due) else {
                break;
            };
            self.on_timer(handle)?;
            if handle == tick_timer {
                ticks += 1;
            }
        }
        Ok(ticks)
    }
}

impl<S: RenderSurface> Typewriter<S, TickerClock> {
    /// Dispatch real-time firings until the engine stops itself.
    ///
    /// # Errors
    ///
    /// Stops at the first failing callback.
    pub fn run(&mut self) -> Result<()> {
        while self.tick_timer.is_some() {
            let handle = self
                .clock
                .receiver()
                .recv()
                .map_err(|_| ticker_disconnected())?;
            self.on_timer(handle)?;
        }
        Ok(())
    }

    /// Dispatch real-time firings (ticks and caret blinks) for `duration`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing callback.
    pub fn run_for(&mut self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            match self.clock.receiver().recv_timeout(remaining) {
                Ok(handle) => self.on_timer(handle)?,
                Err(RecvTimeoutError::Timeout) => return Ok(()),
                Err(RecvTimeoutError::Disconnected) => return Err(ticker_disconnected()),
            }
        }
    }
}

fn ticker_disconnected() -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::BrokenPipe,
        "ticker channel disconnected",
    ))
}
