use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Where log output may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// Subcommands: stderr is free
    Stderr,
    /// Dashboard: the terminal belongs to the UI, so only a file is allowed
    FileOnly,
}

fn env_filter(verbose: bool) -> EnvFilter {
    // RUST_LOG wins over --verbose
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Install the global subscriber. With `Sink::FileOnly` and no file, logging
/// stays off.
pub fn init(verbose: bool, log_file: Option<&Path>, sink: Sink) -> Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(verbose))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        return Ok(());
    }

    if sink == Sink::Stderr {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(verbose))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
