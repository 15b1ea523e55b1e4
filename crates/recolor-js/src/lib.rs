//! recolor JavaScript Functions
//!
//! Compiles a user-written function body into a color transform running on
//! QuickJS via rquickjs. The body sees two parameters, `hexcolor` (`#rrggbb`)
//! and `color` (`[r, g, b, a]`), plus the color API as globals.

mod color_api;
mod console;

use recolor_color::{Color, ColorLike, ColorTransform, TransformError};
use rquickjs::{Context, Ctx, Function, Persistent, Runtime, Value};

/// QuickJS runtime limits
#[derive(Debug, Clone)]
pub struct JsConfig {
    /// Heap limit in bytes
    pub memory_limit: usize,
    /// Stack limit in bytes
    pub max_stack_size: usize,
}

impl Default for JsConfig {
    fn default() -> Self {
        Self {
            memory_limit: 32 * 1024 * 1024,
            max_stack_size: 1024 * 1024,
        }
    }
}

/// Function compile error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("{0}")]
    Syntax(String),

    #[error("script runtime unavailable: {0}")]
    Runtime(String),
}

/// A compiled user function with its own runtime and context
pub struct JsTransform {
    // declared first so it is released before the context
    function: Persistent<Function<'static>>,
    context: Context,
    _runtime: Runtime,
}

impl JsTransform {
    /// Compile a function body with the default limits
    pub fn compile(body: &str) -> Result<Self, CompileError> {
        Self::with_config(body, &JsConfig::default())
    }

    /// Compile a function body
    pub fn with_config(body: &str, config: &JsConfig) -> Result<Self, CompileError> {
        let runtime = Runtime::new().map_err(|e| CompileError::Runtime(e.to_string()))?;
        runtime.set_memory_limit(config.memory_limit);
        runtime.set_max_stack_size(config.max_stack_size);

        let context = Context::full(&runtime).map_err(|e| CompileError::Runtime(e.to_string()))?;

        let function = context.with(|ctx| {
            console::install_console(&ctx).map_err(|e| CompileError::Runtime(e.to_string()))?;
            color_api::install_color_api(&ctx).map_err(|e| CompileError::Runtime(e.to_string()))?;

            let function: Function = ctx
                .eval(wrap_body(body))
                .map_err(|e| CompileError::Syntax(exception_message(&ctx, e)))?;
            Ok::<_, CompileError>(Persistent::save(&ctx, function))
        })?;

        tracing::debug!("Compiled color function ({} bytes)", body.len());

        Ok(Self {
            function,
            context,
            _runtime: runtime,
        })
    }
}

impl ColorTransform for JsTransform {
    fn transform(&mut self, hex: &str, color: Color) -> Result<ColorLike, TransformError> {
        self.context.with(|ctx| {
            let function = self
                .function
                .clone()
                .restore(&ctx)
                .map_err(|e| TransformError::new(e.to_string()))?;

            match function.call::<_, Value>((hex, color.to_array().to_vec())) {
                Ok(value) => Ok(color_like(&value)),
                Err(error) => Err(TransformError::new(exception_message(&ctx, error))),
            }
        })
    }
}

/// A user function that may have failed to compile.
///
/// Compilation never fails here: a broken body turns into a transform that
/// fails on every call, so the run still completes and reports why.
pub enum UserFunction {
    Compiled(JsTransform),
    Broken(CompileError),
}

impl UserFunction {
    pub fn compile(body: &str) -> Self {
        Self::with_config(body, &JsConfig::default())
    }

    pub fn with_config(body: &str, config: &JsConfig) -> Self {
        match JsTransform::with_config(body, config) {
            Ok(transform) => UserFunction::Compiled(transform),
            Err(error) => {
                tracing::warn!("Color function failed to compile: {}", error);
                UserFunction::Broken(error)
            }
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, UserFunction::Compiled(_))
    }
}

impl ColorTransform for UserFunction {
    fn transform(&mut self, hex: &str, color: Color) -> Result<ColorLike, TransformError> {
        match self {
            UserFunction::Compiled(transform) => transform.transform(hex, color),
            UserFunction::Broken(error) => Err(TransformError::new(format!(
                "### FAILED TO COMPILE FUNCTION: {} ###",
                error
            ))),
        }
    }
}

fn wrap_body(body: &str) -> String {
    format!("\"use strict\";\n(function(hexcolor, color) {{\n{}\n}})", body)
}

/// Convert a script return value for normalization
fn color_like(value: &Value<'_>) -> ColorLike {
    if let Some(array) = value.as_array() {
        let components = array
            .iter::<Value>()
            .map(|item| item.ok().and_then(|v| v.as_number()).unwrap_or(f64::NAN))
            .collect();
        return ColorLike::Components(components);
    }

    if let Some(text) = value.as_string().and_then(|s| s.to_string().ok()) {
        return ColorLike::Literal(text);
    }

    ColorLike::Unsupported {
        value: console::format_value(value),
        kind: value.type_name().to_string(),
    }
}

/// Describe a failed evaluation, taking the pending exception if there is one
fn exception_message(ctx: &Ctx<'_>, error: rquickjs::Error) -> String {
    if !matches!(error, rquickjs::Error::Exception) {
        return error.to_string();
    }

    let thrown = ctx.catch();
    if let Some(exception) = thrown.as_exception() {
        let message = exception.message().unwrap_or_default();
        return match exception.as_object().get::<_, String>("name") {
            Ok(name) => format!("{}: {}", name, message),
            Err(_) => message,
        };
    }

    console::format_value(&thrown)
}
