//! Transform Result Normalization
//!
//! A user function may hand back a color, a bare component array or a
//! literal. Everything is funneled through [`normalize`] before it is written
//! back, and non-finite components are rejected right here.

use std::fmt;

use crate::{Color, parse};

/// Anything a color transform may return
#[derive(Debug, Clone, PartialEq)]
pub enum ColorLike {
    /// A finished color
    Color(Color),
    /// `[r, g, b]` or `[r, g, b, a]`
    Components(Vec<f64>),
    /// Text handed to the color literal parser, e.g. `"orange"`
    Literal(String),
    /// A value of some other kind: its rendering and the name of its kind
    Unsupported { value: String, kind: String },
}

/// Why a returned value could not become a color
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("expected 3 or 4 color components, got {0}")]
    WrongArity(usize),

    #[error("'{0}' is not a color")]
    NotAColor(String),

    #[error("cannot use {0} as a color")]
    Unsupported(String),

    #[error("NaN detected in color value")]
    NonFinite,
}

impl NormalizeError {
    /// Non-finite components are a hard validation failure rather than an
    /// unrecognized value.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::NonFinite)
    }
}

/// Turn a transform result into a color.
///
/// Component arrays get a missing alpha padded with `1`; any other length is
/// rejected. Literals are re-parsed. The resulting color must be finite.
pub fn normalize(value: &ColorLike) -> Result<Color, NormalizeError> {
    let color = match value {
        ColorLike::Color(color) => *color,
        ColorLike::Components(components) => match components.as_slice() {
            &[r, g, b] => Color::rgb(r, g, b),
            &[r, g, b, a] => Color::new(r, g, b, a),
            other => return Err(NormalizeError::WrongArity(other.len())),
        },
        ColorLike::Literal(text) => {
            parse(text).ok_or_else(|| NormalizeError::NotAColor(text.clone()))?
        }
        ColorLike::Unsupported { kind, .. } => {
            return Err(NormalizeError::Unsupported(kind.clone()));
        }
    };

    if !color.is_finite() {
        return Err(NormalizeError::NonFinite);
    }
    Ok(color)
}

impl fmt::Display for ColorLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorLike::Color(color) => write_components(f, &color.to_array()),
            ColorLike::Components(components) => write_components(f, components),
            ColorLike::Literal(text) => f.write_str(text),
            ColorLike::Unsupported { value, .. } => f.write_str(value),
        }
    }
}

fn write_components(f: &mut fmt::Formatter<'_>, components: &[f64]) -> fmt::Result {
    f.write_str("[")?;
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("]")
}

impl From<Color> for ColorLike {
    fn from(color: Color) -> Self {
        ColorLike::Color(color)
    }
}

impl From<[f64; 4]> for ColorLike {
    fn from(components: [f64; 4]) -> Self {
        ColorLike::Components(components.to_vec())
    }
}

impl From<[f64; 3]> for ColorLike {
    fn from(components: [f64; 3]) -> Self {
        ColorLike::Components(components.to_vec())
    }
}

impl From<Vec<f64>> for ColorLike {
    fn from(components: Vec<f64>) -> Self {
        ColorLike::Components(components)
    }
}

impl From<&str> for ColorLike {
    fn from(text: &str) -> Self {
        ColorLike::Literal(text.to_string())
    }
}

impl From<String> for ColorLike {
    fn from(text: String) -> Self {
        ColorLike::Literal(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_alpha() {
        let color = normalize(&vec![10.0, 20.0, 30.0].into()).unwrap();
        assert_eq!(color.to_array(), [10.0, 20.0, 30.0, 1.0]);
    }

    #[test]
    fn test_keeps_alpha() {
        let color = normalize(&[10.0, 20.0, 30.0, 0.25].into()).unwrap();
        assert_eq!(color.a, 0.25);
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(normalize(&vec![10.0, 20.0].into()), Err(NormalizeError::WrongArity(2)));
        assert_eq!(
            normalize(&vec![1.0, 2.0, 3.0, 4.0, 5.0].into()),
            Err(NormalizeError::WrongArity(5))
        );
    }

    #[test]
    fn test_nan_is_hard_failure() {
        let err = normalize(&[10.0, 20.0, f64::NAN, 1.0].into()).unwrap_err();
        assert_eq!(err, NormalizeError::NonFinite);
        assert!(err.is_hard());
        assert_eq!(err.to_string(), "NaN detected in color value");
    }

    #[test]
    fn test_infinite_color_rejected() {
        let err = normalize(&Color::rgb(f64::INFINITY, 0.0, 0.0).into()).unwrap_err();
        assert!(err.is_hard());
    }

    #[test]
    fn test_literal() {
        assert_eq!(normalize(&"white".into()), Ok(Color::WHITE));
        let err = normalize(&"bogus".into()).unwrap_err();
        assert_eq!(err, NormalizeError::NotAColor("bogus".to_string()));
        assert!(!err.is_hard());
    }

    #[test]
    fn test_unsupported() {
        let value = ColorLike::Unsupported {
            value: "42".to_string(),
            kind: "int".to_string(),
        };
        assert_eq!(value.to_string(), "42");
        let err = normalize(&value).unwrap_err();
        assert_eq!(err.to_string(), "cannot use int as a color");
    }

    #[test]
    fn test_display() {
        assert_eq!(ColorLike::from(vec![1.0, 2.5, f64::NAN]).to_string(), "[1, 2.5, NaN]");
        assert_eq!(ColorLike::from("teal").to_string(), "teal");
        assert_eq!(ColorLike::from(Color::WHITE).to_string(), "[255, 255, 255, 1]");
    }
}
