//! CSS Color Literals
//!
//! Recognizes color literals using lightningcss and converts them to sRGB.
//! lightningcss keeps alpha in a byte, so the written alpha is read back
//! separately with cssparser-color.

use cssparser::{Parser, ParserInput};
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;

use crate::Color;

/// Parse a CSS color literal (`#fff`, `red`, `rgba(...)`, `hsl(...)`, ...).
///
/// Returns `None` when the text is not a color that resolves to sRGB, which
/// includes `currentColor` and system colors. Callers treat `None` as
/// "nothing to recolor here", not as an error.
pub fn parse(literal: &str) -> Option<Color> {
    let literal = literal.trim();
    if literal.is_empty() {
        return None;
    }

    let parsed = CssColor::parse_string(literal).ok()?;
    match parsed.to_rgb().ok()? {
        CssColor::RGBA(rgba) => {
            let alpha = written_alpha(literal).unwrap_or_else(|| widen(rgba.alpha_f32()));
            Some(Color::new(
                rgba.red as f64,
                rgba.green as f64,
                rgba.blue as f64,
                alpha,
            ))
        }
        _ => None,
    }
}

/// Alpha as written in the literal, before any quantization
fn written_alpha(literal: &str) -> Option<f64> {
    use cssparser_color::Color as Parsed;

    let mut input = ParserInput::new(literal);
    let mut parser = Parser::new(&mut input);
    let alpha = match parser.parse_entirely(Parsed::parse).ok()? {
        Parsed::CurrentColor => return None,
        Parsed::Rgba(rgba) => Some(rgba.alpha),
        Parsed::Hsl(c) => c.alpha,
        Parsed::Hwb(c) => c.alpha,
        Parsed::Lab(c) => c.alpha,
        Parsed::Lch(c) => c.alpha,
        Parsed::Oklab(c) => c.alpha,
        Parsed::Oklch(c) => c.alpha,
        Parsed::ColorFunction(c) => c.alpha,
    };
    // `none` counts as fully transparent
    Some(widen(alpha.unwrap_or(0.0)))
}

/// f32 to f64 through the shortest decimal, so `0.333` stays `0.333`
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(value as f64)
}
