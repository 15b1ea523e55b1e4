//! Color Transform Seam
//!
//! The engine only knows how to call a [`ColorTransform`]; whether it is a
//! Rust closure or a compiled script is decided by whoever builds it.

use crate::{Color, ColorLike};

/// A failure raised by a transform while handling one color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for TransformError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for TransformError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Maps one color occurrence to its replacement.
///
/// `hex` is the `#rrggbb` form of `color`, handed over for convenience since
/// many palettes are keyed by hex code.
pub trait ColorTransform {
    fn transform(&mut self, hex: &str, color: Color) -> Result<ColorLike, TransformError>;
}

impl<F> ColorTransform for F
where
    F: FnMut(&str, Color) -> Result<ColorLike, TransformError>,
{
    fn transform(&mut self, hex: &str, color: Color) -> Result<ColorLike, TransformError> {
        self(hex, color)
    }
}
