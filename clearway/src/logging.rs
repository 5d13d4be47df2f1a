//! Logging infrastructure.
//!
//! Structured logging with dual output:
//! - `logs/clearway.log` (or the configured path), cleared on startup
//! - stdout for terminal tailing
//!
//! Filtering is configurable via the `RUST_LOG` environment variable;
//! the default keeps the crate at `debug` and everything else at `info`.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,clearway=debug";

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the logging system.
///
/// Creates the log directory if needed and truncates the previous log
/// file so each run starts clean.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log
/// file cannot be truncated.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(Path::new(log_dir).join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(io::stdout);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
