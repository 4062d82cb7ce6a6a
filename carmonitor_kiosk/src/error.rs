// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Startup failures.
//!
//! Every variant is fatal: it is reported once, to the user and the log, and
//! the process exits non-zero. Nothing past startup produces one.

use std::io;
use std::path::PathBuf;

use carmonitor_layout::GeometryError;
use carmonitor_nav::script::ScriptError;

use crate::link::LinkError;

/// Title shown in front of every fatal message.
pub(crate) const ERROR_TITLE: &str = "System Error";

/// A collaborator could not be initialized.
#[derive(Debug, thiserror::Error)]
pub(crate) enum InitError {
    /// Config file unreadable.
    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for [`KioskConfig`](crate::config::KioskConfig).
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Screen geometry would produce an unusable layout.
    #[error("invalid screen geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// Log directory or subscriber setup failed.
    #[error("could not set up logging: {0}")]
    Logging(String),

    /// Media root missing.
    #[error("media directory {0} does not exist")]
    MediaDir(PathBuf),

    /// Input script unreadable.
    #[error("could not read input script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input script malformed.
    #[error("invalid input script: {0}")]
    Script(#[from] ScriptError),

    /// Stdin reader thread could not be started.
    #[error("could not start input reader: {0}")]
    Input(#[source] io::Error),

    /// Frame link setup failed.
    #[error("Could Not Initialize TCP Connection: {0}")]
    Link(#[from] LinkError),
}
