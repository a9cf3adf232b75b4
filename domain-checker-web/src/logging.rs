//! Tracing subscriber setup. `log` records from the core crate are bridged in.

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{LogConfig, LogFormat};

const LOG_FILE_PREFIX: &str = "domain-checker.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let (writer, guard, ansi) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), None, true),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
