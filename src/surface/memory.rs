//! MemorySurface: a headless render surface.
//!
//! Keeps an index-ordered mirror of the units and a log of every call,
//! which makes it the surface of choice for tests and for hosts that
//! render the text themselves.

use super::RenderSurface;
use crate::buffer::{Unit, UnitId};
use crate::color::Color;
use crate::error::{Error, Result};

/// One primitive call received by a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// A unit was inserted.
    Insert {
        /// Index the unit now occupies.
        index: usize,
        /// Unit handle.
        id: UnitId,
        /// Grapheme text (`"\n"` for line breaks).
        text: String,
    },
    /// A unit was removed.
    Remove {
        /// Index the unit occupied.
        index: usize,
        /// Unit handle.
        id: UnitId,
    },
    /// The caret moved.
    MoveCaret(usize),
    /// Caret visibility changed.
    CaretVisible(bool),
    /// A unit was recolored.
    Color {
        /// Index of the unit.
        index: usize,
        /// Unit handle.
        id: UnitId,
        /// New color.
        color: Color,
    },
    /// The engine finished a timer callback.
    Flush,
}

#[derive(Debug, Clone)]
struct MirroredUnit {
    id: UnitId,
    text: String,
    color: Option<Color>,
}

/// Headless surface recording every operation.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    units: Vec<MirroredUnit>,
    caret: usize,
    caret_visible: bool,
    base_color: Color,
    ops: Vec<SurfaceOp>,
}

impl MemorySurface {
    /// Create an empty surface with a white base color.
    pub const fn new() -> Self {
        Self::with_base_color(Color::WHITE)
    }

    /// Create an empty surface with the given base color.
    pub const fn with_base_color(base_color: Color) -> Self {
        Self {
            units: Vec::new(),
            caret: 0,
            caret_visible: true,
            base_color,
            ops: Vec::new(),
        }
    }

    /// The mirrored text, line breaks as `'\n'`.
    pub fn text(&self) -> String {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }

    /// Number of mirrored units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the mirror is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Explicit colors of every unit, in order.
    pub fn colors(&self) -> Vec<Option<Color>> {
        self.units.iter().map(|u| u.color).collect()
    }

    /// Explicit color of the unit at `index`.
    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.units.get(index).and_then(|u| u.color)
    }

    /// Unit handles in order.
    pub fn ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|u| u.id).collect()
    }

    /// Caret slot index.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Whether the caret is currently shown.
    pub const fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    /// Every operation received so far.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Take the operation log, leaving it empty.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    fn violation(&self, operation: &'static str, index: usize) -> Error {
        Error::InvariantViolation {
            operation,
            index,
            len: self.units.len(),
        }
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MemorySurface {
    fn insert_unit(&mut self, index: usize, unit: &Unit) -> Result<()> {
        if index > self.units.len() {
            return Err(self.violation("surface insert", index));
        }
        let text = if unit.is_line_break() {
            "\n".to_string()
        } else {
            unit.grapheme().to_string()
        };
        self.units.insert(
            index,
            MirroredUnit {
                id: unit.id(),
                text: text.clone(),
                color: unit.color(),
            },
        );
        if index <= self.caret {
            self.caret += 1;
        }
        self.ops.push(SurfaceOp::Insert {
            index,
            id: unit.id(),
            text,
        });
        Ok(())
    }

    fn remove_unit(&mut self, index: usize, unit: &Unit) -> Result<()> {
        if self.units.get(index).map(|u| u.id) != Some(unit.id()) {
            return Err(self.violation("surface remove", index));
        }
        self.units.remove(index);
        if index < self.caret {
            self.caret -= 1;
        }
        self.ops.push(SurfaceOp::Remove {
            index,
            id: unit.id(),
        });
        Ok(())
    }

    fn move_caret(&mut self, index: usize) -> Result<()> {
        if index > self.units.len() {
            return Err(self.violation("surface move_caret", index));
        }
        self.caret = index;
        self.ops.push(SurfaceOp::MoveCaret(index));
        Ok(())
    }

    fn set_caret_visible(&mut self, visible: bool) -> Result<()> {
        self.caret_visible = visible;
        self.ops.push(SurfaceOp::CaretVisible(visible));
        Ok(())
    }

    fn set_unit_color(&mut self, index: usize, unit: &Unit, color: Color) -> Result<()> {
        let Some(mirrored) = self.units.get_mut(index).filter(|u| u.id == unit.id()) else {
            return Err(self.violation("surface set_unit_color", index));
        };
        mirrored.color = Some(color);
        self.ops.push(SurfaceOp::Color {
            index,
            id: unit.id(),
            color,
        });
        Ok(())
    }

    fn base_color(&self) -> Color {
        self.base_color
    }

    fn flush(&mut self) -> Result<()> {
        self.ops.push(SurfaceOp::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_caret_shifts_caret() {
        let mut surface = MemorySurface::new();
        surface.insert_unit(0, &Unit::glyph(UnitId(0), "a")).unwrap();
        surface.insert_unit(1, &Unit::glyph(UnitId(1), "b")).unwrap();
        assert_eq!(surface.text(), "ab");
        assert_eq!(surface.caret(), 2);
    }

    #[test]
    fn test_remove_left_of_caret_shifts_caret() {
        let mut surface = MemorySurface::new();
        let a = Unit::glyph(UnitId(0), "a");
        let b = Unit::glyph(UnitId(1), "b");
        surface.insert_unit(0, &a).unwrap();
        surface.insert_unit(1, &b).unwrap();

        surface.remove_unit(0, &a).unwrap();
        assert_eq!(surface.caret(), 1);

        surface.move_caret(0).unwrap();
        surface.remove_unit(0, &b).unwrap();
        assert_eq!(surface.caret(), 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_mismatched_handle_is_rejected() {
        let mut surface = MemorySurface::new();
        surface.insert_unit(0, &Unit::glyph(UnitId(0), "a")).unwrap();
        let stranger = Unit::glyph(UnitId(9), "a");
        assert!(surface.remove_unit(0, &stranger).is_err());
        assert!(surface.set_unit_color(0, &stranger, Color::BLACK).is_err());
    }

    #[test]
    fn test_ops_are_recorded() {
        let mut surface = MemorySurface::with_base_color(Color::BLACK);
        surface.set_caret_visible(false).unwrap();
        surface.flush().unwrap();
        assert_eq!(
            surface.take_ops(),
            vec![SurfaceOp::CaretVisible(false), SurfaceOp::Flush]
        );
        assert!(surface.ops().is_empty());
        assert_eq!(surface.base_color(), Color::BLACK);
    }
}
