//! Engine Configuration

use recolor_js::JsConfig;

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Class the recolored rules are scoped under
    pub marker_class: String,

    /// Prefix the output with one `/* ERROR: ... */` line per failure
    pub error_comments: bool,

    /// Limits for script functions
    pub js: JsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_class: "recolor".to_string(),
            error_comments: true,
            js: JsConfig::default(),
        }
    }
}
