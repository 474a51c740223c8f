//! Surface module: where the engine's mutations become visible.
//!
//! A [`RenderSurface`] mirrors the [`TextBuffer`](crate::TextBuffer) by
//! index. The caret occupies a slot between units: inserting at the caret
//! index places the new unit before the caret, removing a unit left of the
//! caret shifts the caret left with it.
//!
//! - [`MemorySurface`]: headless mirror that records every primitive call
//! - [`TerminalSurface`]: ANSI true-color rendering to any `Write`

mod memory;
mod output;
mod terminal;

pub use memory::{MemorySurface, SurfaceOp};
pub use output::OutputBuffer;
pub use terminal::{TerminalSurface, TerminalSurfaceConfig};

use crate::buffer::Unit;
use crate::color::Color;
use crate::error::Result;

/// The primitive operations the engine needs from a display.
pub trait RenderSurface {
    /// Insert `unit` so that it occupies `index`.
    fn insert_unit(&mut self, index: usize, unit: &Unit) -> Result<()>;

    /// Remove `unit`, which currently occupies `index`.
    fn remove_unit(&mut self, index: usize, unit: &Unit) -> Result<()>;

    /// Place the caret before the unit at `index` (or at the end).
    fn move_caret(&mut self, index: usize) -> Result<()>;

    /// Show or hide the caret.
    fn set_caret_visible(&mut self, visible: bool) -> Result<()>;

    /// Recolor a colorizable unit.
    fn set_unit_color(&mut self, index: usize, unit: &Unit, color: Color) -> Result<()>;

    /// The surface's default text color.
    fn base_color(&self) -> Color;

    /// Present everything changed since the last flush.
    ///
    /// Called once at the end of every timer callback.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
