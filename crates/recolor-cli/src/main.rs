//! recolor - Main Entry Point
//!
//! Reads a stylesheet from stdin and writes its recolored variant to stdout.

use std::io::{self, Read, Write};

use anyhow::Context;
use clap::Parser;
use recolor_engine::js::JsTransform;
use recolor_engine::{Config, Engine};

/// Produce a themed variant of a stylesheet by running every color through a
/// JavaScript function body.
///
/// The body receives `hexcolor` ("#rrggbb") and `color` ([r, g, b, a]) and
/// returns a color array or any CSS color string.
#[derive(Parser, Debug)]
#[command(name = "recolor")]
#[command(version)]
struct Cli {
    /// Function body, e.g. "return color_rgb_value_invert(color);"
    #[arg(short, long)]
    function: String,

    /// Class the recolored rules are scoped under
    #[arg(short, long, default_value = "recolor")]
    class: String,

    /// Leave failures out of the output (they are still logged)
    #[arg(long)]
    no_error_comments: bool,

    /// Fail instead of reporting a function that does not compile
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config {
        marker_class: cli.class,
        error_comments: !cli.no_error_comments,
        ..Config::default()
    };

    if cli.strict {
        JsTransform::with_config(&cli.function, &config.js).context("function does not compile")?;
    }

    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stylesheet from stdin")?;

    let engine = Engine::new(config);
    let recolored = engine.recolor_with_script(&source, &cli.function)?;

    if recolored.has_errors() {
        tracing::warn!("{} error lines while recoloring", recolored.errors.len());
    }

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(recolored.render().as_bytes())
        .context("failed to write output")?;
    stdout.flush()?;

    Ok(())
}
