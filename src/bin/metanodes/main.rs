//! metanodes - live FM → wave folder demo
//!
//! Run with: cargo run
//! Set METANODES_LOG (e.g. `METANODES_LOG=debug`) to write logs to metanodes.log.

mod app;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::Demo;

const LOG_ENV: &str = "METANODES_LOG";
const LOG_FILE: &str = "metanodes.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    Demo::new().run()
}

/// The terminal belongs to the TUI, so logs only go to a file and only on request.
fn init_logging() -> EyreResult<()> {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return Ok(());
    };

    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {}", LOG_FILE))?;
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(%directive, "logging enabled");
    Ok(())
}
