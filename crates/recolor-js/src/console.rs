//! Console API
//!
//! `console.log` and friends for user functions, forwarded to tracing.

use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object, Value};
use std::fmt::Write;

const LEVELS: &[&str] = &["log", "info", "warn", "error", "debug"];

/// Install console API into the global object
pub fn install_console(ctx: &Ctx<'_>) -> rquickjs::Result<()> {
    let console = Object::new(ctx.clone())?;

    for &level in LEVELS {
        console.set(
            level,
            Function::new(ctx.clone(), move |args: Rest<Value>| {
                log_with_level(level, &args.0);
            })?,
        )?;
    }

    ctx.globals().set("console", console)?;
    Ok(())
}

fn log_with_level(level: &str, values: &[Value<'_>]) {
    let output = values.iter().map(format_value).collect::<Vec<_>>().join(" ");

    match level {
        "error" => tracing::error!("[color function] {}", output),
        "warn" => tracing::warn!("[color function] {}", output),
        "debug" => tracing::debug!("[color function] {}", output),
        _ => tracing::info!("[color function] {}", output),
    }
}

/// Format a JavaScript value for logs and diagnostics
pub(crate) fn format_value(value: &Value<'_>) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value<'_>) {
    if value.is_undefined() {
        out.push_str("undefined");
    } else if value.is_null() {
        out.push_str("null");
    } else if let Some(b) = value.as_bool() {
        write!(out, "{}", b).ok();
    } else if let Some(n) = value.as_number() {
        write!(out, "{}", n).ok();
    } else if let Some(s) = value.as_string() {
        if let Ok(s) = s.to_string() {
            out.push_str(&s);
        }
    } else if let Some(array) = value.as_array() {
        // colors are arrays, print them in full
        out.push('[');
        for (i, item) in array.iter::<Value>().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match item {
                Ok(item) => write_value(out, &item),
                Err(_) => out.push('?'),
            }
        }
        out.push(']');
    } else if value.is_function() {
        out.push_str("[Function]");
    } else if value.is_object() {
        out.push_str("[Object]");
    } else {
        out.push_str(value.type_name());
    }
}
