use crate::config::Config;
use crate::utils::ensure_file_can_be_created;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

/// Installs the global subscriber. Logs go to stderr, or to `log_file` when configured.
///
/// The returned guard flushes the file writer on drop and must be kept alive.
pub fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log level `{}`", config.log_level))?;

    let Some(log_file) = config.log_file.as_deref() else {
        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_timer(SystemTime)
            .with_writer(std::io::stderr);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set tracing subscriber")?;

        return Ok(None);
    };

    let log_file = Path::new(log_file);
    ensure_file_can_be_created(log_file)?;
    let directory = log_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("Log file `{}` has no file name", log_file.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::NEVER, directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    // Create a custom format for the logs
    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(SystemTime)
        .with_writer(writer);

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::info!("Logging system initialized. Writing to {}", log_file.display());

    Ok(Some(guard))
}
