// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// In-vehicle camera and Android-Auto kiosk.
///
/// Reads touch input as `down X Y` / `up X Y` / `idle N` / `quit` lines, from
/// `--script` or stdin, and presents frames through the headless renderer.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "carmonitor", version, about)]
pub(crate) struct Cli {
    /// TOML config file. Every setting has a default.
    #[arg(short, long, env = "CARMONITOR_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Replay input from a script file instead of stdin.
    #[arg(short, long)]
    pub(crate) script: Option<PathBuf>,

    /// Directory containing the `media/` folder.
    #[arg(long)]
    pub(crate) media_dir: Option<PathBuf>,

    /// Directory for `carMonitor_log.txt`.
    #[arg(long)]
    pub(crate) log_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `carmonitor_nav=trace`. `RUST_LOG` wins.
    #[arg(long)]
    pub(crate) log_level: Option<String>,

    /// Stop after this many ticks.
    #[arg(long)]
    pub(crate) max_ticks: Option<u64>,

    /// Ticks a press is held before its release counts.
    #[arg(long)]
    pub(crate) debounce_ticks: Option<u32>,

    /// Pause between ticks, in microseconds.
    #[arg(long)]
    pub(crate) tick_interval_us: Option<u64>,

    /// Wait for a frame source on the TCP link before starting.
    #[arg(long)]
    pub(crate) ingest: bool,

    /// TCP port for the frame link.
    #[arg(long)]
    pub(crate) port: Option<u16>,
}
