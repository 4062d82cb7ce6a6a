// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Car monitor kiosk.
//!
//! Starts the monitor on its main overview and drives the navigation state
//! machine until the input source quits:
//!
//! 1. Parse flags and the optional TOML config.
//! 2. Install logging to the console and `carMonitor_log.txt`.
//! 3. Validate the screen geometry and check the media directory.
//! 4. Open the input source (`--script` file, else stdin) and, when enabled,
//!    wait for the frame source on the TCP link.
//! 5. Present the overview, then tick.
//!
//! Any startup failure is logged and printed as `System Error: ...`, and the
//! process exits with status 1.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

mod app;
mod cli;
mod config;
mod error;
mod input;
mod link;
mod logging;
mod render;

use crate::cli::Cli;
use crate::config::KioskConfig;
use crate::error::{ERROR_TITLE, InitError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match KioskConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };
    config.apply_cli(&cli);

    let _guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(err) => return fail(&err),
    };
    info!(version = env!("CARGO_PKG_VERSION"), "car monitor starting");

    let mut kiosk = match app::launch(&cli, &config) {
        Ok(kiosk) => kiosk,
        Err(err) => return fail(&err),
    };

    let Ok(summary) = kiosk.run();
    info!(
        ticks = summary.ticks,
        frames = summary.frames,
        bytes_received = summary.bytes_received,
        reason = ?summary.reason,
        "shutting down"
    );
    ExitCode::SUCCESS
}

fn fail(err: &InitError) -> ExitCode {
    error!(error = %err, "{ERROR_TITLE}");
    eprintln!("{ERROR_TITLE}: {err}");
    ExitCode::FAILURE
}
