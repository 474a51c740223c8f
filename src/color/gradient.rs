//! Per-line linear gradients.
//!
//! A character at offset `i` inside a line of `n` characters gets the
//! ratio `i / n`, so the first character sits exactly on the start color
//! and the last one stops short of the end color at `(n - 1) / n`.

use super::Color;

/// Position ratio of the `index`-th character in a line of `len` characters.
///
/// Returns `0.0` for an empty line.
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn ratio(index: usize, len: usize) -> f32 {
    if len == 0 {
        0.0
    } else {
        index as f32 / len as f32
    }
}

/// Start and end colors of an active gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// Color at ratio 0.
    pub start: Color,
    /// Color approached as the ratio tends to 1.
    pub end: Color,
}

impl Gradient {
    /// Create a gradient between two colors.
    #[inline]
    pub const fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Color of the `index`-th character in a line of `len` characters.
    #[inline]
    pub fn color_at(&self, index: usize, len: usize) -> Color {
        self.start.lerp(self.end, ratio(index, len))
    }

    /// Colors for every character of a line of `len` characters, in order.
    pub fn line_colors(&self, len: usize) -> impl Iterator<Item = Color> + '_ {
        (0..len).map(move |index| self.color_at(index, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_first_is_zero() {
        assert!(ratio(0, 7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ratio_last_stops_short_of_one() {
        let last = ratio(3, 4);
        assert!((last - 0.75).abs() < f32::EPSILON);
        assert!(last < 1.0);
    }

    #[test]
    fn test_ratio_empty_line() {
        assert!(ratio(0, 0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_two_character_line() {
        let gradient = Gradient::new(Color::BLACK, Color::WHITE);
        let colors: Vec<Color> = gradient.line_colors(2).collect();
        assert_eq!(colors, vec![Color::BLACK, Color::rgb(127.5, 127.5, 127.5)]);
    }

    #[test]
    fn test_channels_interpolate_independently() {
        let gradient = Gradient::new(Color::rgb(255.0, 43.0, 91.0), Color::rgb(255.0, 227.0, 207.0));
        let color = gradient.color_at(1, 4);
        assert!((color.r - 255.0).abs() < f32::EPSILON);
        assert!((color.g - 89.0).abs() < 1e-4);
        assert!((color.b - 120.0).abs() < 1e-4);
    }
}
