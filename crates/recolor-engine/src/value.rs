//! Value transformer
//!
//! Recolors a single declaration value. A failing transform is recorded and
//! contained here so sibling values carry on.

use recolor_color::{ColorTransform, normalize};
use recolor_css::Value;

/// What happened to one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Color rewritten
    Transformed,
    /// Not a color, left untouched
    Skipped,
    /// A color the transform could not handle; left untouched, error recorded
    Failed,
}

/// Run `transform` over `value` if it holds a color, writing the result back
/// to `value.text`. Failures are appended to `errors`.
pub fn process_value(
    value: &mut Value,
    transform: &mut dyn ColorTransform,
    errors: &mut Vec<String>,
) -> Outcome {
    let Some(color) = recolor_color::parse(&value.literal) else {
        return Outcome::Skipped;
    };

    let (returned, result) = match transform.transform(&color.to_hex(), color) {
        Ok(returned) => {
            let result = normalize(&returned).map_err(|e| e.to_string());
            (Some(returned), result)
        }
        Err(error) => (None, Err(error.to_string())),
    };

    match result {
        Ok(recolored) => {
            value.text = recolored.to_css_text();
            Outcome::Transformed
        }
        Err(reason) => {
            let returned = returned.map_or_else(|| "none".to_string(), |r| r.to_string());
            tracing::warn!("Color function failed on '{}': {}", value.literal, reason);
            errors.push(format!(
                "Failed to call function with color '{}', returned value: {}, error: {}",
                value.literal, returned, reason
            ));
            Outcome::Failed
        }
    }
}
