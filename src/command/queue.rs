//! CommandQueue: FIFO of commands plus the builder compilation rules.
//!
//! Every builder call with a trailing delay compiles into the command
//! itself followed by a separate [`Command::Delay`] when the delay is
//! positive. Negative delays are clamped to zero.

use super::Command;
use crate::color::Color;
use std::collections::VecDeque;
use std::time::Duration;

/// Clamp a millisecond delay to a non-negative duration.
pub fn clamp_delay(delay_ms: i64) -> Duration {
    if delay_ms < 0 {
        tracing::warn!(delay_ms, "negative delay clamped to zero");
    }
    Duration::from_millis(u64::try_from(delay_ms).unwrap_or(0))
}

/// Ordered queue of pending commands.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            commands: VecDeque::new(),
        }
    }

    /// Number of queued commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over queued commands in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Take the next command.
    pub fn pop(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    /// Discard every queued command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Append a command with no trailing delay.
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Append a command, followed by a delay command when `delay_ms > 0`.
    pub fn push_with_delay(&mut self, command: Command, delay_ms: i64) {
        self.push(command);
        let duration = clamp_delay(delay_ms);
        if !duration.is_zero() {
            self.push(Command::Delay { duration });
        }
    }

    /// Queue a single run of text.
    pub fn type_text(&mut self, text: &str, delay_ms: i64) {
        self.push_with_delay(
            Command::Type {
                text: text.to_string(),
            },
            delay_ms,
        );
    }

    /// Queue several lines: every entry but the last gets a trailing
    /// newline, and only the first entry carries the delay.
    pub fn type_lines<S: AsRef<str>>(&mut self, lines: &[S], delay_ms: i64) {
        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.iter().enumerate() {
            let mut text = line.as_ref().to_string();
            if index != last {
                text.push('\n');
            }
            let delay = if index == 0 { delay_ms } else { 0 };
            self.push_with_delay(Command::Type { text }, delay);
        }
    }

    /// Queue a single line break.
    pub fn new_line(&mut self, delay_ms: i64) {
        self.type_text("\n", delay_ms);
    }

    /// Queue a relative cursor move.
    pub fn move_by(&mut self, offset: i64, delay_ms: i64) {
        self.push_with_delay(Command::Move { offset }, delay_ms);
    }

    /// Queue a deletion of `offset` units (negative deletes backwards).
    pub fn delete(&mut self, offset: i64, delay_ms: i64) {
        self.push_with_delay(Command::Delete { offset }, delay_ms);
    }

    /// Queue a standalone delay.
    pub fn delay(&mut self, duration_ms: i64) {
        self.push(Command::Delay {
            duration: clamp_delay(duration_ms),
        });
    }

    /// Queue a gradient switch.
    pub fn gradient(&mut self, start: Color, end: Color) {
        self.push(Command::Gradient { start, end });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Command {
        Command::Type {
            text: text.to_string(),
        }
    }

    fn delay(ms: u64) -> Command {
        Command::Delay {
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_trailing_delay_is_separate_command() {
        let mut queue = CommandQueue::new();
        queue.type_text("hi", 100);
        queue.move_by(-1, 0);
        let commands: Vec<_> = queue.iter().cloned().collect();
        assert_eq!(commands, vec![typed("hi"), delay(100), Command::Move { offset: -1 }]);
    }

    #[test]
    fn test_negative_delay_clamps_to_zero() {
        let mut queue = CommandQueue::new();
        queue.delete(-2, -50);
        assert_eq!(queue.len(), 1);

        queue.delay(-10);
        assert_eq!(queue.iter().last(), Some(&delay(0)));
    }

    #[test]
    fn test_multi_line_joins_and_delays_first_only() {
        let mut queue = CommandQueue::new();
        queue.type_lines(&["a", "b", "c"], 100);
        let commands: Vec<_> = queue.iter().cloned().collect();
        assert_eq!(
            commands,
            vec![typed("a\n"), delay(100), typed("b\n"), typed("c")]
        );
    }

    #[test]
    fn test_two_lines() {
        let mut queue = CommandQueue::new();
        queue.type_lines(&["a", "b"], 100);
        let commands: Vec<_> = queue.iter().cloned().collect();
        assert_eq!(commands, vec![typed("a\n"), delay(100), typed("b")]);
    }

    #[test]
    fn test_empty_lines_queue_nothing() {
        let mut queue = CommandQueue::new();
        queue.type_lines::<&str>(&[], 100);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new();
        queue.new_line(0);
        queue.move_by(Command::TO_START, 0);
        assert_eq!(queue.pop(), Some(typed("\n")));
        assert_eq!(queue.pop(), Some(Command::Move { offset: i64::MIN }));
        assert_eq!(queue.pop(), None);
    }
}
