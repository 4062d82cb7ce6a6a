// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kiosk configuration: TOML file, then command-line overrides.
//!
//! Every field has a default, so an empty file (or none at all) runs the
//! 800 × 480 monitor with a 60-tick hold.

use std::path::{Path, PathBuf};
use std::time::Duration;

use carmonitor_layout::Geometry;
use carmonitor_nav::machine::DEFAULT_DEBOUNCE_TICKS;
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::InitError;

/// Everything the kiosk reads at startup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct KioskConfig {
    pub(crate) geometry: Geometry,
    pub(crate) navigation: NavigationConfig,
    pub(crate) media: MediaConfig,
    pub(crate) ingest: IngestConfig,
    pub(crate) clock: ClockConfig,
    pub(crate) logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct NavigationConfig {
    pub(crate) debounce_ticks: u32,
    pub(crate) tick_interval_us: u64,
    pub(crate) max_ticks: Option<u64>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            debounce_ticks: DEFAULT_DEBOUNCE_TICKS,
            tick_interval_us: 1_000,
            max_ticks: None,
        }
    }
}

impl NavigationConfig {
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_micros(self.tick_interval_us)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MediaConfig {
    /// Directory the `media/...` paths are resolved against.
    pub(crate) dir: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct IngestConfig {
    pub(crate) enabled: bool,
    pub(crate) port: u16,
    pub(crate) accept_timeout_ms: u64,
    /// Where to write the first received chunk, if anywhere.
    pub(crate) dump_path: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9999,
            accept_timeout_ms: 10_000,
            dump_path: None,
        }
    }
}

impl IngestConfig {
    pub(crate) fn accept_timeout(&self) -> Duration {
        Duration::from_millis(self.accept_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ClockConfig {
    /// Follow the local wall clock; otherwise the overview shows 12:59.
    pub(crate) follow_system: bool,
    pub(crate) twelve_hour: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            follow_system: true,
            twelve_hour: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoggingConfig {
    pub(crate) dir: PathBuf,
    pub(crate) file_name: String,
    pub(crate) level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_name: "carMonitor_log.txt".to_owned(),
            level: "info".to_owned(),
        }
    }
}

impl KioskConfig {
    /// Read `path`, or use defaults when no file is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, InitError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| InitError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| InitError::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Let command-line flags win over file values.
    pub(crate) fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.media_dir {
            self.media.dir.clone_from(dir);
        }
        if let Some(dir) = &cli.log_dir {
            self.logging.dir.clone_from(dir);
        }
        if let Some(level) = &cli.log_level {
            self.logging.level.clone_from(level);
        }
        if let Some(ticks) = cli.debounce_ticks {
            self.navigation.debounce_ticks = ticks;
        }
        if let Some(us) = cli.tick_interval_us {
            self.navigation.tick_interval_us = us;
        }
        if cli.max_ticks.is_some() {
            self.navigation.max_ticks = cli.max_ticks;
        }
        if cli.ingest {
            self.ingest.enabled = true;
        }
        if let Some(port) = cli.port {
            self.ingest.port = port;
        }
    }
}
