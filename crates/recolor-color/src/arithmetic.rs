//! Color Arithmetic
//!
//! Component-wise operations over colors. Nothing here clamps; results may
//! leave the nominal channel ranges and are expected to be normalized before
//! they are serialized.

use crate::{Color, wrap255};

/// -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
pub fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Linear interpolation of two scalars
pub fn lerp_scalar(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// `3x² - 2x³`
pub fn smoothstep(x: f64) -> f64 {
    x * x * (3.0 - 2.0 * x)
}

fn zip(c1: Color, c2: Color, op: impl Fn(f64, f64) -> f64) -> Color {
    Color::new(op(c1.r, c2.r), op(c1.g, c2.g), op(c1.b, c2.b), op(c1.a, c2.a))
}

fn map_rgb(color: Color, op: impl Fn(f64) -> f64) -> Color {
    Color::new(op(color.r), op(color.g), op(color.b), color.a)
}

pub fn add(c1: Color, c2: Color) -> Color {
    zip(c1, c2, |a, b| a + b)
}

pub fn subtract(c1: Color, c2: Color) -> Color {
    zip(c1, c2, |a, b| a - b)
}

/// Channels multiply in the 0-255 scale (`a * b / 255`); alpha multiplies directly.
pub fn multiply(c1: Color, c2: Color) -> Color {
    Color::new(
        c1.r * c2.r / 255.0,
        c1.g * c2.g / 255.0,
        c1.b * c2.b / 255.0,
        c1.a * c2.a,
    )
}

/// Division by a zero component yields an infinity or NaN
pub fn divide(c1: Color, c2: Color) -> Color {
    zip(c1, c2, |a, b| a / b)
}

/// Truncated remainder, component-wise
pub fn modulo(c1: Color, c2: Color) -> Color {
    zip(c1, c2, |a, b| a % b)
}

/// Channels are raised in normalized space keeping the sign of the base:
/// `sign(c1) * 255 * (|c1| / 255) ^ c2`. Alpha is a plain power.
pub fn power(c1: Color, c2: Color) -> Color {
    let channel = |base: f64, exp: f64| (base.abs() / 255.0).powf(exp) * sign(base) * 255.0;
    Color::new(
        channel(c1.r, c2.r),
        channel(c1.g, c2.g),
        channel(c1.b, c2.b),
        c1.a.powf(c2.a),
    )
}

/// `c1 * (1 - t) + c2 * t` on all four components; `t` is not clamped
pub fn lerp(c1: Color, c2: Color, t: f64) -> Color {
    zip(c1, c2, |a, b| lerp_scalar(a, b, t))
}

/// Channels add with wraparound into `[0, 256)`; alpha is a plain sum
pub fn shift(c1: Color, c2: Color) -> Color {
    Color::new(
        wrap255(c1.r + c2.r),
        wrap255(c1.g + c2.g),
        wrap255(c1.b + c2.b),
        c1.a + c2.a,
    )
}

fn average(color: Color) -> f64 {
    (color.r + color.g + color.b) / 3.0
}

/// Shift overall brightness by `amount` with wraparound, keeping the
/// differences between channels.
pub fn rgb_value_shift(color: Color, amount: f64) -> Color {
    let avg = average(color);
    let delta = wrap255(avg + amount) - avg;
    map_rgb(color, |c| c + delta)
}

/// Reflect the average brightness around 127.5. `scale = 1` is a full invert.
pub fn rgb_value_invert(color: Color, scale: f64) -> Color {
    let avg = average(color);
    let delta = (255.0 - avg) - avg;
    map_rgb(color, |c| c + delta * scale)
}

/// Move toward a smoothstep-curved version of the color by `amount`
pub fn soft_contrast(color: Color, amount: f64) -> Color {
    let curved = Color::new(
        smoothstep(color.r / 255.0) * 255.0,
        smoothstep(color.g / 255.0) * 255.0,
        smoothstep(color.b / 255.0) * 255.0,
        smoothstep(color.a),
    );
    lerp(color, curved, amount)
}

/// Move toward a target that halves each channel's distance to its nearest
/// extreme by `amount`
pub fn cut_contrast(color: Color, amount: f64) -> Color {
    let cut = |c: f64| if c < 128.0 { c / 2.0 } else { 255.0 - (255.0 - c) / 2.0 };
    let target = Color::new(
        cut(color.r),
        cut(color.g),
        cut(color.b),
        if color.a < 0.5 { color.a / 2.0 } else { 1.0 - (1.0 - color.a) / 2.0 },
    );
    lerp(color, target, amount)
}
