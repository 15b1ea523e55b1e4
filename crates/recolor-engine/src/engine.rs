//! Engine - Main entry point

use std::fmt;

use recolor_color::ColorTransform;
use recolor_css::{Stylesheet, parse_stylesheet};
use recolor_js::UserFunction;

use crate::walker::Walker;
use crate::{Config, RecolorError};

/// The recolor engine
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        tracing::info!(
            "recolor engine {} initialized (marker class '{}')",
            crate::VERSION,
            config.marker_class
        );
        Self { config }
    }

    /// Recolor a stylesheet with a transform
    pub fn recolor(
        &self,
        source: &str,
        transform: &mut dyn ColorTransform,
    ) -> Result<Recolored, RecolorError> {
        let mut stylesheet = parse_stylesheet(source)?;

        let mut walker = Walker::new(transform, &self.config.marker_class);
        walker.process_stylesheet(&mut stylesheet);
        let errors = walker.into_errors();

        tracing::debug!(
            "Recolored stylesheet: {} rules kept, {} error lines",
            stylesheet.len(),
            errors.len()
        );

        Ok(Recolored {
            stylesheet,
            errors,
            error_comments: self.config.error_comments,
        })
    }

    /// Compile a function body and recolor with it.
    ///
    /// A body that does not compile still produces output: every color fails
    /// and the compile error shows up in the error comments.
    pub fn recolor_with_script(&self, source: &str, body: &str) -> Result<Recolored, RecolorError> {
        let mut function = UserFunction::with_config(body, &self.config.js);
        self.recolor(source, &mut function)
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// A recolored stylesheet and the failures met on the way
#[derive(Debug, Clone)]
pub struct Recolored {
    pub stylesheet: Stylesheet,
    pub errors: Vec<String>,
    error_comments: bool,
}

impl Recolored {
    /// Final text: error comment lines, then the stylesheet
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.error_comments {
            for error in &self.errors {
                out.push_str(&error_comment(error));
            }
        }
        out.push_str(&self.stylesheet.to_css());
        out
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for Recolored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn error_comment(message: &str) -> String {
    format!("/* ERROR: {} */\n", message.replace("*/", "* /"))
}

/// Per-run parameters for [`recolor_document`]
pub struct TransformParams<T> {
    pub transform: T,
    pub marker_class: String,
}

/// Recolor `source` and render it in one call
pub fn recolor_document<T: ColorTransform>(
    source: &str,
    params: &mut TransformParams<T>,
) -> Result<String, RecolorError> {
    let engine = Engine::new(Config {
        marker_class: params.marker_class.clone(),
        ..Config::default()
    });
    Ok(engine.recolor(source, &mut params.transform)?.render())
}
