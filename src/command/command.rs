//! Command: one queued animation instruction.

use crate::color::Color;
use std::time::Duration;

/// A queued animation instruction.
///
/// Commands are immutable once queued and execute in FIFO order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Type text at the cursor, one grapheme per tick.
    Type {
        /// Text to type; `'\n'` produces a line break.
        text: String,
    },

    /// Move the cursor by a signed number of units.
    Move {
        /// Signed offset, clamped against the buffer when dequeued.
        offset: i64,
    },

    /// Delete units next to the cursor.
    Delete {
        /// Signed offset; negative deletes backwards.
        offset: i64,
    },

    /// Hold the queue for a duration.
    Delay {
        /// How long to hold.
        duration: Duration,
    },

    /// Enable per-line gradient coloring.
    Gradient {
        /// Color at the start of each line.
        start: Color,
        /// Color approached at the end of each line.
        end: Color,
    },
}

impl Command {
    /// Offset meaning "as far left as the buffer allows".
    pub const TO_START: i64 = i64::MIN;
    /// Offset meaning "as far right as the buffer allows".
    pub const TO_END: i64 = i64::MAX;

    /// Short name of the command kind, for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Type { .. } => "type",
            Self::Move { .. } => "move",
            Self::Delete { .. } => "delete",
            Self::Delay { .. } => "delay",
            Self::Gradient { .. } => "gradient",
        }
    }
}
