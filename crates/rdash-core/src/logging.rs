//! Tracing subscriber setup.
//!
//! The interactive dashboard owns stdout, so its logs go to a daily rolling
//! file under `$RDASH_HOME/logs/`. Every other command logs to stderr.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "RDASH_LOG";

const LOG_FILE_NAME: &str = "rdash.log";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rolling file in the rdash log directory.
    File,
    /// Standard error, without ANSI colors when piped.
    Stderr,
}

/// Builds the filter from `RDASH_LOG`, falling back to `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// Returns the appender guard for [`LogTarget::File`]; keep it alive until
/// exit so buffered lines are flushed. Installing twice is a no-op.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(target: LogTarget, default_level: &str) -> Result<Option<WorkerGuard>> {
    init_in(target, default_level, &crate::config::paths::log_dir())
}

/// Same as [`init`] with an explicit log directory.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init_in(
    target: LogTarget,
    default_level: &str,
    log_dir: &Path,
) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(default_level);

    match target {
        LogTarget::File => {
            fs::create_dir_all(log_dir).with_context(|| {
                format!("Failed to create log directory {}", log_dir.display())
            })?;
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(filter);
            let _ = tracing_subscriber::registry().with(layer).try_init();
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter);
            let _ = tracing_subscriber::registry().with(layer).try_init();
            Ok(None)
        }
    }
}
