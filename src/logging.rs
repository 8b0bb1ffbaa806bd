// File: ./src/logging.rs
// Logger setup for desktop frontends. Android logging is set up in `mobile`.
use crate::context::AppContext;
use anyhow::{Context, Result};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build()
}

/// The TUI owns the terminal, so records go to `socialqr.log` in the cache dir.
pub fn init_file_logger(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    let path = ctx.get_log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    WriteLogger::init(level, log_config(), file).context("Logger already initialised")?;
    Ok(())
}

/// One-shot CLI commands log to stderr so stdout stays clean for output.
pub fn init_stderr_logger(level: LevelFilter) -> Result<()> {
    TermLogger::init(level, log_config(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("Logger already initialised")?;
    Ok(())
}
