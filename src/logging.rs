use anyhow::{Context, Result};
use tracing::{Level, Metadata};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::prelude::*;

use crate::config::Settings;

/// Install the global subscriber: a rotating file sink and, if enabled,
/// a stdout sink that only shows DEBUG events.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// until the process exits.
pub fn init(settings: &Settings) -> Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(settings.log_file_prefix.as_str())
        .max_log_files(settings.log_max_files.max(1))
        .build(&settings.log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", settings.log_dir))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::DEBUG);

    let stdout_layer = settings.log_to_stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(filter_fn(stdout_event))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Events shown on stdout
pub(crate) fn stdout_event(meta: &Metadata<'_>) -> bool {
    *meta.level() == Level::DEBUG
}
