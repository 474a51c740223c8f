//! Color: RGB(A) record with fractional channels.
//!
//! Channels are stored as `f32` so gradient interpolation can hand
//! unrounded values to the render surface. Rounding (if any) is the
//! surface's business.

use crate::error::ColorError;
use std::fmt;
use std::str::FromStr;

/// An RGB color with optional alpha.
///
/// `r`, `g` and `b` live in `[0, 255]`; `a` lives in `[0, 1]` and
/// defaults to fully opaque.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel (0-255)
    pub r: f32,
    /// Green channel (0-255)
    pub g: f32,
    /// Blue channel (0-255)
    pub b: f32,
    /// Alpha (0-1)
    pub a: f32,
}

impl Color {
    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with explicit alpha.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);

    /// Create from a 24-bit hex value (e.g., 0xFF5500).
    #[inline]
    pub fn from_u32(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as f32,
            ((hex >> 8) & 0xFF) as f32,
            (hex & 0xFF) as f32,
        )
    }

    /// Parse either the `rgb(...)`/`rgba(...)` form or the `#RRGGBB` form.
    pub fn parse(text: &str) -> Result<Self, ColorError> {
        let normalized = text.trim().to_ascii_lowercase();

        if normalized.starts_with("rgb") {
            parse_functional(text, &normalized)
        } else if let Some(digits) = normalized.strip_prefix('#') {
            parse_hex(text, digits)
        } else {
            Err(ColorError::UnrecognizedForm {
                input: text.to_string(),
            })
        }
    }

    /// Check that every channel is finite and inside its documented range.
    pub fn is_in_range(&self) -> bool {
        let channel = |c: f32| (0.0..=255.0).contains(&c);
        channel(self.r) && channel(self.g) && channel(self.b) && (0.0..=1.0).contains(&self.a)
    }

    /// Linearly interpolate every channel towards `other`.
    ///
    /// The result is left unrounded and `ratio` is not clamped.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, ratio: f32) -> Self {
        Self {
            r: self.r + ratio * (other.r - self.r),
            g: self.g + ratio * (other.g - self.g),
            b: self.b + ratio * (other.b - self.b),
            a: self.a + ratio * (other.a - self.a),
        }
    }

    /// Round and saturate the channels to bytes for 24-bit output.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let byte = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        (byte(self.r), byte(self.g), byte(self.b))
    }
}

fn parse_functional(input: &str, normalized: &str) -> Result<Color, ColorError> {
    let fail = |reason: String| ColorError::Rgb {
        input: input.to_string(),
        reason,
    };

    let (Some(open), Some(close)) = (normalized.find('('), normalized.rfind(')')) else {
        return Err(fail("missing parentheses".to_string()));
    };
    if close < open || !normalized[close + 1..].trim().is_empty() {
        return Err(fail("unbalanced parentheses".to_string()));
    }

    let parts: Vec<&str> = normalized[open + 1..close].split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(fail(format!("expected 3 or 4 components, found {}", parts.len())));
    }

    let mut channels = [0.0f32; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let value: f32 = part
            .parse()
            .map_err(|_| fail(format!("component {part:?} is not a number")))?;
        if !(0.0..=255.0).contains(&value) {
            return Err(fail(format!("component {part} outside 0-255")));
        }
        *slot = value;
    }

    let alpha = match parts.get(3) {
        Some(part) => {
            let value: f32 = part
                .parse()
                .map_err(|_| fail(format!("alpha {part:?} is not a number")))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(fail(format!("alpha {part} outside 0-1")));
            }
            value
        }
        None => 1.0,
    };

    Ok(Color::rgba(channels[0], channels[1], channels[2], alpha))
}

fn parse_hex(input: &str, digits: &str) -> Result<Color, ColorError> {
    let fail = |reason: &str| ColorError::Hex {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if digits.len() != 6 {
        return Err(fail("expected exactly 6 hex digits"));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(fail("contains non-hex digits"));
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| fail("contains non-hex digits"))?;
    Ok(Color::from_u32(value))
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(f32::from(r), f32::from(g), f32::from(b))
    }
}

impl From<u32> for Color {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

impl fmt::Display for Color {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let color = Color::parse("#FF8000").unwrap();
        assert_eq!(color, Color::rgb(255.0, 128.0, 0.0));
        assert_eq!(Color::parse("#002b5b").unwrap(), Color::from_u32(0x002B5B));
    }

    #[test]
    fn test_parse_rgb_and_rgba() {
        assert_eq!(Color::parse("rgb(55, 65, 81)").unwrap(), Color::rgb(55.0, 65.0, 81.0));
        assert_eq!(
            Color::parse("RGBA(1,2,3,0.5)").unwrap(),
            Color::rgba(1.0, 2.0, 3.0, 0.5)
        );
    }

    #[test]
    fn test_hex_and_rgb_normalize_to_same_record() {
        assert_eq!(
            Color::parse("#FFE3CF").unwrap(),
            Color::parse("rgb(255, 227, 207)").unwrap()
        );
    }

    #[test]
    fn test_parse_reports_failed_form() {
        assert!(matches!(Color::parse("rgb(1, 2)"), Err(ColorError::Rgb { .. })));
        assert!(matches!(Color::parse("rgb(1, 2, 300)"), Err(ColorError::Rgb { .. })));
        assert!(matches!(Color::parse("rgb 1, 2, 3"), Err(ColorError::Rgb { .. })));
        assert!(matches!(Color::parse("#12345"), Err(ColorError::Hex { .. })));
        assert!(matches!(Color::parse("#12345G"), Err(ColorError::Hex { .. })));
        assert!(matches!(
            Color::parse("blue"),
            Err(ColorError::UnrecognizedForm { .. })
        ));
    }

    #[test]
    fn test_lerp_is_unrounded() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(127.5, 127.5, 127.5));
    }

    #[test]
    fn test_to_rgb8_rounds_and_saturates() {
        assert_eq!(Color::rgb(127.5, -3.0, 300.0).to_rgb8(), (128, 0, 255));
    }

    #[test]
    fn test_is_in_range() {
        assert!(Color::WHITE.is_in_range());
        assert!(!Color::rgb(256.0, 0.0, 0.0).is_in_range());
        assert!(!Color::rgb(f32::NAN, 0.0, 0.0).is_in_range());
        assert!(!Color::rgba(0.0, 0.0, 0.0, 1.5).is_in_range());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(0.0, 127.5, 255.0).to_string(), "rgb(0, 127.5, 255)");
        assert_eq!(Color::rgba(1.0, 2.0, 3.0, 0.5).to_string(), "rgba(1, 2, 3, 0.5)");
    }
}
