//! recolor Color Model
//!
//! Four-component colors as they flow through a recolor run.
//!
//! - `model`: the [`Color`] value type, clamping and CSS serialization
//! - `parse`: CSS color literals via lightningcss
//! - `normalize`: turning whatever a transform returned back into a [`Color`]
//! - `arithmetic`: the color API user functions are expected to call
//! - `transform`: the [`ColorTransform`] seam the engine calls per color

mod model;
mod parse;
mod normalize;
mod transform;
pub mod arithmetic;

pub use model::{Color, clamp255, clamp01, wrap255};
pub use parse::parse;
pub use normalize::{ColorLike, NormalizeError, normalize};
pub use transform::{ColorTransform, TransformError};
