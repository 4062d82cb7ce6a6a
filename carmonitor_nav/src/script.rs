// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-based input scripts.
//!
//! A script replays touch input without a touchscreen. One step per line:
//!
//! ```text
//! # open the front camera
//! down 60 60
//! idle 60
//! up 60 60
//! quit
//! ```
//!
//! - `down X Y` / `up X Y`: pointer events.
//! - `idle N`: `N` polls that report [`Event::None`].
//! - `quit`: a quit request.
//! - Blank lines and `#` comments are skipped.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::collab::InputSource;
use crate::types::Event;

/// One parsed script line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Step {
    /// Deliver an event.
    Event(Event),
    /// Report nothing for this many polls.
    Idle(u32),
}

/// What was wrong with a script line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptErrorKind {
    /// The first word is not a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A required argument is absent.
    #[error("missing {0}")]
    MissingArgument(&'static str),
    /// An argument is not a valid integer.
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    /// Extra words after a complete command.
    #[error("unexpected `{0}` after command")]
    TrailingInput(String),
}

/// A script line failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("script line {line}: {kind}")]
pub struct ScriptError {
    /// One-based line number.
    pub line: usize,
    /// The problem.
    pub kind: ScriptErrorKind,
}

impl Step {
    /// Parse a single line. `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, ScriptErrorKind> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };

        let step = match command.to_ascii_lowercase().as_str() {
            "down" => {
                let (x, y) = coords(&mut words)?;
                Self::Event(Event::PointerDown { x, y })
            }
            "up" => {
                let (x, y) = coords(&mut words)?;
                Self::Event(Event::PointerUp { x, y })
            }
            "idle" => Self::Idle(number(words.next(), "tick count")?),
            "quit" => Self::Event(Event::Quit),
            other => return Err(ScriptErrorKind::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(ScriptErrorKind::TrailingInput(extra.to_string()));
        }
        Ok(Some(step))
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(i32, i32), ScriptErrorKind> {
    let x = number(words.next(), "x coordinate")?;
    let y = number(words.next(), "y coordinate")?;
    Ok((x, y))
}

fn number<T: core::str::FromStr>(word: Option<&str>, what: &'static str) -> Result<T, ScriptErrorKind> {
    let word = word.ok_or(ScriptErrorKind::MissingArgument(what))?;
    word.parse()
        .map_err(|_| ScriptErrorKind::InvalidNumber(word.to_string()))
}

/// A parsed script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Parse a whole script, stopping at the first bad line.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (i, line) in text.lines().enumerate() {
            match Step::parse(line) {
                Ok(Some(step)) => steps.push(step),
                Ok(None) => {}
                Err(kind) => return Err(ScriptError { line: i + 1, kind }),
            }
        }
        Ok(Self { steps })
    }

    /// Parsed steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl FromIterator<Step> for Script {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// An [`InputSource`] that plays back a [`Script`].
///
/// Once the script runs out it keeps reporting its trailing event:
/// [`Event::Quit`] by default, so a scripted session ends on its own.
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    steps: Vec<Step>,
    next: usize,
    idle_left: u32,
    trailing: Event,
}

impl ScriptedInput {
    /// Play back `script`, then report quit.
    pub fn new(script: Script) -> Self {
        Self {
            steps: script.steps,
            next: 0,
            idle_left: 0,
            trailing: Event::Quit,
        }
    }

    /// Report `event` forever once the script is exhausted.
    pub fn with_trailing(mut self, event: Event) -> Self {
        self.trailing = event;
        self
    }

    /// Whether every step has been delivered.
    pub fn is_exhausted(&self) -> bool {
        self.idle_left == 0 && self.next >= self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Event {
        loop {
            if self.idle_left > 0 {
                self.idle_left -= 1;
                return Event::None;
            }
            let Some(step) = self.steps.get(self.next).copied() else {
                return self.trailing;
            };
            self.next += 1;
            match step {
                Step::Event(event) => return event,
                Step::Idle(n) => self.idle_left = n,
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.trailing == Event::Quit && self.is_exhausted()
    }
}
