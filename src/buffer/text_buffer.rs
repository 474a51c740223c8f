//! TextBuffer: ordered units plus an insertion cursor.
//!
//! The cursor is an insertion point in `[0, len]`; the caret is rendered
//! just before the unit at the cursor index. All index arithmetic is
//! checked and reported as [`Error::InvariantViolation`] instead of
//! panicking.

use super::unit::{Unit, UnitId};
use crate::error::{Error, Result};
use std::ops::Range;

/// Direction of a cursor movement or deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Direction {
    /// Towards the start of the buffer.
    Left = -1,
    /// Towards the end of the buffer.
    Right = 1,
}

/// A clamped cursor journey computed before any step is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Travel {
    /// Destination cursor index, already clamped to `[0, len]`.
    pub destination: usize,
    /// Number of single-unit steps between the cursor and `destination`.
    pub steps: usize,
    /// Direction of travel (`Right` when the destination is not behind).
    pub direction: Direction,
}

/// Ordered sequence of rendered units with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    units: Vec<Unit>,
    cursor: usize,
    next_id: u64,
}

impl TextBuffer {
    /// Create an empty buffer with the cursor at 0.
    pub const fn new() -> Self {
        Self {
            units: Vec::new(),
            cursor: 0,
            next_id: 0,
        }
    }

    /// Get the number of units (glyphs and line breaks).
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the buffer holds no units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get the cursor index.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the units in order.
    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Get a unit by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    /// Get a mutable unit by index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Unit> {
        self.units.get_mut(index)
    }

    /// Get a mutable iterator over all units.
    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    /// Allocate a fresh unit handle.
    pub fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a unit at the cursor and advance the cursor past it.
    ///
    /// Returns the index the unit now occupies.
    pub fn insert_at_cursor(&mut self, unit: Unit) -> Result<usize> {
        let index = self.cursor;
        if index > self.units.len() {
            return Err(self.violation("insert", index));
        }
        self.units.insert(index, unit);
        self.cursor += 1;
        Ok(index)
    }

    /// Remove the unit at `index`, leaving the cursor untouched.
    pub fn remove(&mut self, index: usize) -> Result<Unit> {
        if index >= self.units.len() {
            return Err(self.violation("remove", index));
        }
        Ok(self.units.remove(index))
    }

    /// Place the cursor at `index`.
    pub fn set_cursor(&mut self, index: usize) -> Result<()> {
        if index > self.units.len() {
            return Err(self.violation("set_cursor", index));
        }
        self.cursor = index;
        Ok(())
    }

    /// Move the cursor one unit in `direction`.
    ///
    /// Returns the new cursor index.
    pub fn step_cursor(&mut self, direction: Direction) -> Result<usize> {
        let next = match direction {
            Direction::Left => self.cursor.checked_sub(1),
            Direction::Right => Some(self.cursor + 1).filter(|&i| i <= self.units.len()),
        };
        let Some(next) = next else {
            return Err(self.violation("step_cursor", self.cursor));
        };
        self.cursor = next;
        Ok(next)
    }

    /// Plan a journey of `offset` units from the cursor.
    ///
    /// The destination is clamped into `[0, len]` first; the step count is
    /// the distance to that clamped destination. `i64::MIN` and `i64::MAX`
    /// act as "to start" and "to end".
    pub fn plan_travel(&self, offset: i64) -> Travel {
        let len = i64::try_from(self.units.len()).unwrap_or(i64::MAX);
        let current = i64::try_from(self.cursor).unwrap_or(i64::MAX);
        let destination = current.saturating_add(offset).clamp(0, len);
        // Clamped into [0, len], so the conversion cannot fail.
        let destination = usize::try_from(destination).unwrap_or(0);

        Travel {
            destination,
            steps: destination.abs_diff(self.cursor),
            direction: if destination >= self.cursor {
                Direction::Right
            } else {
                Direction::Left
            },
        }
    }

    /// Range of glyph units on the line containing `index`.
    ///
    /// A line break belongs to the line it terminates and is excluded from
    /// the range; an index equal to `len` refers to the last line.
    pub fn line_range(&self, index: usize) -> Range<usize> {
        let index = index.min(self.units.len());
        let start = self.units[..index]
            .iter()
            .rposition(Unit::is_line_break)
            .map_or(0, |p| p + 1);
        let end = self.units[index..]
            .iter()
            .position(Unit::is_line_break)
            .map_or(self.units.len(), |p| index + p);
        start..end
    }

    /// Glyph count of every line, in order.
    pub fn line_lengths(&self) -> Vec<usize> {
        self.units
            .split(Unit::is_line_break)
            .map(<[Unit]>::len)
            .collect()
    }

    /// Number of lines (one more than the number of line breaks).
    pub fn line_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_line_break()).count() + 1
    }

    /// Render the buffer as plain text, line breaks as `'\n'`.
    pub fn text(&self) -> String {
        self.units
            .iter()
            .map(|u| if u.is_line_break() { "\n" } else { u.grapheme() })
            .collect()
    }

    /// Drop all units and reset the cursor.
    pub fn clear(&mut self) {
        self.units.clear();
        self.cursor = 0;
    }

    fn violation(&self, operation: &'static str, index: usize) -> Error {
        Error::InvariantViolation {
            operation,
            index,
            len: self.units.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        for ch in text.chars() {
            let id = buffer.allocate_id();
            let unit = Unit::from_grapheme(id, ch.encode_utf8(&mut [0; 4]));
            buffer.insert_at_cursor(unit).unwrap();
        }
        buffer
    }

    #[test]
    fn test_insert_advances_cursor() {
        let buffer = buffer_with("abc");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buffer = buffer_with("ac");
        buffer.set_cursor(1).unwrap();
        let id = buffer.allocate_id();
        assert_eq!(buffer.insert_at_cursor(Unit::glyph(id, "b")).unwrap(), 1);
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let buffer = buffer_with("aaa");
        let ids: Vec<UnitId> = buffer.units().iter().map(Unit::id).collect();
        assert_eq!(ids, vec![UnitId(0), UnitId(1), UnitId(2)]);
    }

    #[test]
    fn test_out_of_bounds_is_violation() {
        let mut buffer = buffer_with("ab");
        assert!(matches!(
            buffer.remove(2),
            Err(Error::InvariantViolation { operation: "remove", index: 2, len: 2 })
        ));
        assert!(buffer.set_cursor(3).is_err());
        assert!(buffer.step_cursor(Direction::Right).is_err());
        buffer.set_cursor(0).unwrap();
        assert!(buffer.step_cursor(Direction::Left).is_err());
    }

    #[test]
    fn test_plan_travel_clamps_before_counting() {
        let mut buffer = buffer_with("hello");
        assert_eq!(
            buffer.plan_travel(i64::MIN),
            Travel { destination: 0, steps: 5, direction: Direction::Left }
        );
        assert_eq!(
            buffer.plan_travel(10),
            Travel { destination: 5, steps: 0, direction: Direction::Right }
        );

        buffer.set_cursor(2).unwrap();
        assert_eq!(
            buffer.plan_travel(i64::MAX),
            Travel { destination: 5, steps: 3, direction: Direction::Right }
        );
        assert_eq!(
            buffer.plan_travel(-1),
            Travel { destination: 1, steps: 1, direction: Direction::Left }
        );
    }

    #[test]
    fn test_line_bookkeeping() {
        let buffer = buffer_with("ab\ncde\n");
        assert_eq!(buffer.line_lengths(), vec![2, 3, 0]);
        assert_eq!(buffer.line_count(), 3);

        assert_eq!(buffer.line_range(0), 0..2);
        assert_eq!(buffer.line_range(2), 0..2); // the break ends line 0
        assert_eq!(buffer.line_range(4), 3..6);
        assert_eq!(buffer.line_range(7), 7..7);
    }
}
