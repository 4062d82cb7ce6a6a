// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing setup: console plus the kiosk log file.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;
use crate::error::InitError;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Keep the returned
/// guard alive until shutdown so buffered file output is flushed.
pub(crate) fn init(config: &LoggingConfig) -> Result<WorkerGuard, InitError> {
    std::fs::create_dir_all(&config.dir).map_err(|e| {
        InitError::Logging(format!("cannot create {}: {e}", config.dir.display()))
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(config.file_name.as_str())
        .build(&config.dir)
        .map_err(|e| InitError::Logging(e.to_string()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InitError::Logging(format!("bad log level `{}`: {e}", config.level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| InitError::Logging(e.to_string()))?;

    Ok(guard)
}
