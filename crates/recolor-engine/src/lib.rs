//! recolor Engine
//!
//! Produces a themed variant of a stylesheet: every color runs through a
//! user function, every selector is scoped under a marker class, and rules
//! left without a recolored declaration are dropped.
//!
//! # Example
//! ```rust,ignore
//! use recolor_engine::{Config, Engine};
//!
//! let engine = Engine::new(Config::default());
//! let recolored = engine.recolor_with_script(css, "return color_rgb_value_invert(color);")?;
//! print!("{}", recolored.render());
//! ```

mod config;
mod engine;
mod error;
mod value;
mod walker;

pub use config::Config;
pub use engine::{Engine, Recolored, TransformParams, recolor_document};
pub use error::RecolorError;
pub use value::{Outcome, process_value};

// Re-export sub-crates for advanced usage
pub use recolor_color as color;
pub use recolor_css as css;
pub use recolor_js as js;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
