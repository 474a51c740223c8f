//! Buffer module: the ordered text model the engine mutates.
//!
//! This module contains:
//! - [`Unit`]: one rendered glyph or line break with a stable [`UnitId`]
//! - [`TextBuffer`]: ordered units, the cursor, and line bookkeeping
//! - [`Direction`] / [`Travel`]: clamped cursor journeys

mod text_buffer;
mod unit;

pub use text_buffer::{Direction, TextBuffer, Travel};
pub use unit::{is_line_break, Unit, UnitFlags, UnitId};
