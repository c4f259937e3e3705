//! Log setup. The interactive session owns the terminal, so logs go to
//! `imagepicker.log` in the user cache directory, filtered by `IMAGEPICKER_LOG`
//! (default `info`). Setting the variable also mirrors logs to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::{DefaultFields, FmtSpan, Format};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "IMAGEPICKER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Keep the returned guard alive until exit,
/// or buffered lines are lost.
pub fn init_logging() -> Result<WorkerGuard> {
    let log_file = log_file_path().context("Failed to determine cache directory")?;
    if let Some(cache_dir) = log_file.parent() {
        std::fs::create_dir_all(cache_dir)
            .with_context(|| format!("Failed to create {}", cache_dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = std::env::var(LOG_ENV).ok();
    let stderr_layer = filter
        .is_some()
        .then(|| layer(std::io::stderr).with_ansi(true));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter.as_deref().unwrap_or(DEFAULT_FILTER)))
        .with(layer(writer).with_ansi(false))
        .with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;

    Ok(guard)
}

/// Formatting shared by the file and stderr outputs. Closed spans get a line
/// with their timing.
fn layer<S, W>(writer: W) -> fmt::Layer<S, DefaultFields, Format, W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::CLOSE)
}

pub fn log_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "imagepicker")
        .map(|dirs| dirs.cache_dir().join("imagepicker.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_names_the_app() {
        if let Some(path) = log_file_path() {
            assert_eq!(path.file_name().unwrap(), "imagepicker.log");
        }
    }
}
