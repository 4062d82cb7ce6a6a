// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator seams: where input comes from and where frames go.
//!
//! The state machine only ever talks to an [`InputSource`]; the driving loop
//! forwards the commands it produces to a [`Renderer`]. Both are owned by the
//! loop and touched only between ticks.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::types::{Event, RenderCommand};

/// Non-blocking supplier of raw input events.
pub trait InputSource {
    /// Return the next pending event, or [`Event::None`] if there is none.
    ///
    /// Must not block: the machine calls this from inside a tick.
    fn poll_event(&mut self) -> Event;

    /// Whether the source has ended for good.
    ///
    /// A closed source only ever reports [`Event::Quit`] from here on. The
    /// machine ignores that quit mid-press, so a driving loop uses this to stop
    /// instead of waiting for a release that cannot come.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    #[inline]
    fn poll_event(&mut self) -> Event {
        (**self).poll_event()
    }

    #[inline]
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    #[inline]
    fn poll_event(&mut self) -> Event {
        (**self).poll_event()
    }

    #[inline]
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// A queue of pending events, drained front to back.
impl InputSource for VecDeque<Event> {
    fn poll_event(&mut self) -> Event {
        self.pop_front().unwrap_or(Event::None)
    }
}

/// Consumer of render commands.
///
/// Implementations own image loading, caching, and the draw/present calls.
pub trait Renderer {
    /// Failure to draw a frame. Never fed back into navigation.
    type Error;

    /// Draw `command`'s layers back to front, then present.
    fn present(&mut self, command: &RenderCommand) -> Result<(), Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Error = R::Error;

    #[inline]
    fn present(&mut self, command: &RenderCommand) -> Result<(), Self::Error> {
        (**self).present(command)
    }
}

/// A renderer that keeps every command it is given.
///
/// Handy for tests and for replaying a session without a display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands presented so far, oldest first.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        core::mem::take(&mut self.commands)
    }
}

impl Renderer for RecordingRenderer {
    type Error = core::convert::Infallible;

    fn present(&mut self, command: &RenderCommand) -> Result<(), Self::Error> {
        self.commands.push(command.clone());
        Ok(())
    }
}
