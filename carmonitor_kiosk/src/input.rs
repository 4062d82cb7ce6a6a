// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live input: script lines read from a blocking reader on a helper thread.
//!
//! The navigation loop must never block, so a reader thread parses lines into
//! [`Step`]s and the loop picks them up through a channel.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use carmonitor_nav::collab::InputSource;
use carmonitor_nav::script::Step;
use carmonitor_nav::types::Event;
use tracing::{debug, warn};

/// Non-blocking [`InputSource`] over a line-oriented reader such as stdin.
///
/// Malformed lines are logged and skipped. End of input reports
/// [`Event::Quit`].
#[derive(Debug)]
pub(crate) struct LineInput {
    steps: Receiver<Step>,
    idle_left: u32,
    closed: bool,
}

impl LineInput {
    /// Start reading `reader` on a background thread.
    pub(crate) fn spawn<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("input-lines".to_owned())
            .spawn(move || {
                for (i, line) in reader.lines().enumerate() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            warn!(error = %e, "input stream failed");
                            break;
                        }
                    };
                    match Step::parse(&line) {
                        Ok(Some(step)) => {
                            if tx.send(step).is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(kind) => warn!(line = i + 1, %kind, "ignoring input line"),
                    }
                }
                debug!("input stream ended");
            })?;
        Ok(Self {
            steps: rx,
            idle_left: 0,
            closed: false,
        })
    }
}

impl InputSource for LineInput {
    fn poll_event(&mut self) -> Event {
        if self.idle_left > 0 {
            self.idle_left -= 1;
            return Event::None;
        }
        loop {
            match self.steps.try_recv() {
                Ok(Step::Event(event)) => return event,
                Ok(Step::Idle(0)) => {}
                Ok(Step::Idle(n)) => {
                    self.idle_left = n - 1;
                    return Event::None;
                }
                Err(TryRecvError::Empty) => return Event::None,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    return Event::Quit;
                }
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
