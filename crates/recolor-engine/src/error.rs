//! Engine errors

use recolor_css::CssError;

/// Document-level failure; nothing is produced
#[derive(Debug, thiserror::Error)]
pub enum RecolorError {
    #[error("Stylesheet could not be parsed: {0}")]
    Parse(#[from] CssError),
}
