//! Unit: one rendered element of the typed text.
//!
//! A unit is either a glyph (one extended grapheme cluster) or a line break.
//! Units carry a stable [`UnitId`] so render surfaces can keep their own
//! handle tables in sync with the buffer.

use crate::color::Color;
use bitflags::bitflags;

/// Stable handle of a rendered unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u64);

bitflags! {
    /// Unit-level flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UnitFlags: u8 {
        /// This unit is a line break rather than a glyph
        const LINE_BREAK = 0b0000_0001;
        /// This unit accepts per-unit colors (gradient mode)
        const COLORIZABLE = 0b0000_0010;
    }
}

/// A rendered unit held by the [`TextBuffer`](super::TextBuffer).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    id: UnitId,
    /// Grapheme text; empty for line breaks.
    grapheme: Box<str>,
    /// Display width in terminal columns (0 for line breaks).
    display_width: u8,
    flags: UnitFlags,
    /// Color assigned while colorizable.
    color: Option<Color>,
}

impl Unit {
    /// Create a glyph unit from a grapheme cluster.
    pub fn glyph(id: UnitId, grapheme: &str) -> Self {
        let width = unicode_width::UnicodeWidthStr::width(grapheme);
        Self {
            id,
            grapheme: grapheme.into(),
            display_width: u8::try_from(width).unwrap_or(u8::MAX),
            flags: UnitFlags::empty(),
            color: None,
        }
    }

    /// Create a line-break unit.
    pub fn line_break(id: UnitId) -> Self {
        Self {
            id,
            grapheme: "".into(),
            display_width: 0,
            flags: UnitFlags::LINE_BREAK,
            color: None,
        }
    }

    /// Create a glyph unit, or a line break for `"\n"` / `"\r\n"`.
    pub fn from_grapheme(id: UnitId, grapheme: &str) -> Self {
        if is_line_break(grapheme) {
            Self::line_break(id)
        } else {
            Self::glyph(id, grapheme)
        }
    }

    /// Get the unit handle.
    #[inline]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Get the grapheme text (empty for line breaks).
    #[inline]
    pub fn grapheme(&self) -> &str {
        &self.grapheme
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> UnitFlags {
        self.flags
    }

    /// Check if this unit is a line break.
    #[inline]
    pub const fn is_line_break(&self) -> bool {
        self.flags.contains(UnitFlags::LINE_BREAK)
    }

    /// Check if this unit accepts per-unit colors.
    #[inline]
    pub const fn is_colorizable(&self) -> bool {
        self.flags.contains(UnitFlags::COLORIZABLE)
    }

    /// Get the assigned color, if any.
    #[inline]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Upgrade a glyph into a colorizable unit. Line breaks are left alone.
    pub fn make_colorizable(&mut self) {
        if !self.is_line_break() {
            self.flags.insert(UnitFlags::COLORIZABLE);
        }
    }

    /// Mark as colorizable (builder pattern).
    #[must_use]
    pub fn colorizable(mut self) -> Self {
        self.make_colorizable();
        self
    }

    /// Assign a color. Has no effect unless the unit is colorizable.
    ///
    /// Returns `true` if the color was applied.
    pub fn set_color(&mut self, color: Color) -> bool {
        if self.is_colorizable() {
            self.color = Some(color);
            true
        } else {
            false
        }
    }
}

/// Check whether a grapheme cluster denotes a line break.
#[inline]
pub fn is_line_break(grapheme: &str) -> bool {
    grapheme == "\n" || grapheme == "\r\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_width() {
        assert_eq!(Unit::glyph(UnitId(0), "A").display_width(), 1);
        assert_eq!(Unit::glyph(UnitId(1), "日").display_width(), 2);
    }

    #[test]
    fn test_line_break_detection() {
        assert!(Unit::from_grapheme(UnitId(0), "\n").is_line_break());
        assert!(Unit::from_grapheme(UnitId(0), "\r\n").is_line_break());
        assert!(!Unit::from_grapheme(UnitId(0), "x").is_line_break());
    }

    #[test]
    fn test_color_requires_colorizable() {
        let mut unit = Unit::glyph(UnitId(0), "a");
        assert!(!unit.set_color(Color::WHITE));
        assert_eq!(unit.color(), None);

        unit.make_colorizable();
        assert!(unit.set_color(Color::WHITE));
        assert_eq!(unit.color(), Some(Color::WHITE));
    }

    #[test]
    fn test_line_break_never_colorizable() {
        let unit = Unit::line_break(UnitId(3)).colorizable();
        assert!(!unit.is_colorizable());
    }
}
