//! Color module: parsing and interpolation.
//!
//! - [`Color`]: fractional RGB(A) record accepted by render surfaces
//! - [`Gradient`]: start/end pair producing per-line colors

mod gradient;
mod rgb;

pub use gradient::{ratio, Gradient};
pub use rgb::Color;
