//! Progress state of the command currently being stepped.

use crate::buffer::{Direction, TextBuffer};
use crate::command::Command;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Called/target counters plus the travel direction.
///
/// Created when a command is dequeued, dropped when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Steps performed so far.
    pub called: usize,
    /// Steps needed to complete.
    pub target: usize,
    /// Travel direction (meaningful for moves and deletions).
    pub direction: Direction,
}

impl Progress {
    /// Fresh progress towards `target` steps.
    pub const fn new(target: usize, direction: Direction) -> Self {
        Self {
            called: 0,
            target,
            direction,
        }
    }

    /// Check whether every step has been performed.
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.called >= self.target
    }

    /// Record one performed step.
    #[inline]
    pub fn advance(&mut self) {
        self.called += 1;
    }
}

/// What the active command does on each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Insert the next grapheme.
    Type(Vec<String>),
    /// Move the caret one unit.
    Move,
    /// Delete one unit next to the cursor.
    Delete,
    /// Wait one tick.
    Delay,
}

/// A dequeued, tick-paced command with its progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCommand {
    /// Per-step behavior.
    pub kind: StepKind,
    /// How far it has advanced.
    pub progress: Progress,
}

impl ActiveCommand {
    /// Derive progress for a tick-paced command.
    ///
    /// Moves and deletions clamp their destination against the buffer
    /// before counting steps. Returns `None` for commands that are applied
    /// instantly (gradients).
    pub fn begin(command: Command, buffer: &TextBuffer, period: Duration) -> Option<Self> {
        let (kind, progress) = match command {
            Command::Type { text } => {
                let graphemes: Vec<String> = text.graphemes(true).map(str::to_string).collect();
                let target = graphemes.len();
                (StepKind::Type(graphemes), Progress::new(target, Direction::Right))
            }
            Command::Move { offset } => {
                let travel = buffer.plan_travel(offset);
                (StepKind::Move, Progress::new(travel.steps, travel.direction))
            }
            Command::Delete { offset } => {
                let travel = buffer.plan_travel(offset);
                (StepKind::Delete, Progress::new(travel.steps, travel.direction))
            }
            Command::Delay { duration } => (
                StepKind::Delay,
                Progress::new(delay_ticks(duration, period), Direction::Right),
            ),
            Command::Gradient { .. } => return None,
        };
        Some(Self { kind, progress })
    }
}

/// Number of ticks a delay occupies: `duration / period`, rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn delay_ticks(duration: Duration, period: Duration) -> usize {
    if period.is_zero() {
        return 0;
    }
    (duration.as_secs_f64() / period.as_secs_f64()).round() as usize
}
