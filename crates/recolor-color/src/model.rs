//! Color Value Type
//!
//! Channels are kept as `f64` so arithmetic can leave the nominal range
//! mid-computation. Clamping happens only when a color is serialized.

use std::fmt;

/// A color with r, g, b in the 0-255 domain and alpha in the 0-1 domain.
///
/// Components are not clamped; see [`Color::to_hex`] and
/// [`Color::to_css_text`] for the serialized forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255.0, g: 255.0, b: 255.0, a: 1.0 };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Components in `[r, g, b, a]` order
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }

    /// `#rrggbb` form. Channels are clamped to 0-255 and rounded; alpha is ignored.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b)
        )
    }

    /// Text written back into the stylesheet.
    ///
    /// Opaque colors (alpha exactly `1`) use the hex form, everything else
    /// becomes `rgba(R,G,B,A)` with integer channels and the clamped, unrounded alpha.
    pub fn to_css_text(&self) -> String {
        if self.a == 1.0 {
            return self.to_hex();
        }
        // `+ 0.0` folds a negative zero so it never prints as "-0"
        format!(
            "rgba({},{},{},{})",
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
            clamp01(self.a) + 0.0
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 4]> for Color {
    fn from([r, g, b, a]: [f64; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [f64; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_text())
    }
}

/// Clamp to the 0-255 channel range
pub fn clamp255(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 255.0 {
        255.0
    } else {
        x
    }
}

/// Clamp to the 0-1 alpha range
pub fn clamp01(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

/// Wrap into `[0, 256)`. Used by the shift operations, never by serialization.
pub fn wrap255(x: f64) -> f64 {
    ((x % 256.0) + 256.0) % 256.0
}

fn channel_byte(x: f64) -> u8 {
    // NaN falls through both comparisons in clamp255 and saturates to 0 here
    clamp255(x).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_clamps_and_rounds() {
        assert_eq!(Color::rgb(300.0, -10.0, 128.0).to_hex(), "#ff0080");
        assert_eq!(Color::rgb(0.4, 0.5, 254.6).to_hex(), "#0001ff");
    }

    #[test]
    fn test_hex_ignores_alpha() {
        assert_eq!(Color::new(16.0, 32.0, 48.0, 0.25).to_hex(), "#102030");
    }

    #[test]
    fn test_css_text_opaque_is_hex() {
        let color = Color::rgb(255.0, 0.0, 0.0);
        assert_eq!(color.to_css_text(), "#ff0000");
        assert_eq!(color.to_css_text(), color.to_hex());
    }

    #[test]
    fn test_css_text_translucent_is_rgba() {
        assert_eq!(Color::new(10.2, 20.7, 300.0, 0.5).to_css_text(), "rgba(10,21,255,0.5)");
        assert_eq!(Color::new(0.0, 0.0, 0.0, 0.333).to_css_text(), "rgba(0,0,0,0.333)");
    }

    #[test]
    fn test_css_text_clamps_alpha() {
        assert_eq!(Color::new(0.0, 0.0, 0.0, 1.5).to_css_text(), "rgba(0,0,0,1)");
        assert_eq!(Color::new(0.0, 0.0, 0.0, -2.0).to_css_text(), "rgba(0,0,0,0)");
        assert_eq!(Color::new(0.0, 0.0, 0.0, -0.0).to_css_text(), "rgba(0,0,0,0)");
    }

    #[test]
    fn test_wrap255() {
        assert_eq!(wrap255(260.0), 4.0);
        assert_eq!(wrap255(-1.0), 255.0);
        assert_eq!(wrap255(256.0), 0.0);
        assert_eq!(wrap255(12.5), 12.5);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp255(-3.0), 0.0);
        assert_eq!(clamp255(256.0), 255.0);
        assert_eq!(clamp01(0.4), 0.4);
        assert_eq!(clamp01(7.0), 1.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Color::WHITE.is_finite());
        assert!(!Color::new(1.0, f64::NAN, 0.0, 1.0).is_finite());
        assert!(!Color::new(1.0, 0.0, 0.0, f64::INFINITY).is_finite());
    }
}
