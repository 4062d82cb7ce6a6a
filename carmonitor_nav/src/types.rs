// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for navigation: input events, debounce phases, and the commands
//! handed to the renderer.
//!
//! ## Overview
//!
//! These types describe the protocol between the
//! [`NavigationStateMachine`](crate::machine::NavigationStateMachine) and its
//! collaborators. Input arrives as [`Event`]s; each tick reports a [`Tick`],
//! which may carry a [`RenderCommand`].

use carmonitor_layout::View;
use carmonitor_layout::scene::Frame;

/// A raw input event from the touchscreen or the window system.
///
/// Coordinates are screen pixels. Sources must be non-blocking and report
/// [`Event::None`] when nothing is pending.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Event {
    /// Nothing pending.
    #[default]
    None,
    /// The user or the system asked the kiosk to exit.
    Quit,
    /// Finger or button went down.
    PointerDown {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// Finger or button came up.
    PointerUp {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
}

/// Where the machine is in the press → hold → release cycle.
///
/// Reset to [`DebounceState::Idle`] after every confirmed tap.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DebounceState {
    /// Waiting for a pointer-down; input is sampled every tick.
    #[default]
    Idle,
    /// Holding off after a pointer-down. Counts ticks; input is not sampled.
    Pressed(u32),
    /// Hold time elapsed; waiting for the pointer-up that confirms the tap.
    Released,
}

/// The two shapes of render command.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CommandKind {
    /// A different view was entered (or the overview clock changed); draw the
    /// whole view.
    FullView,
    /// The parking-guide overlay was toggled on the rear camera view.
    OverlayToggle,
}

/// What the renderer should draw next.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderCommand {
    /// Why the frame is being drawn.
    pub kind: CommandKind,
    /// Layers to draw, back to front, followed by a present.
    pub frame: Frame,
}

impl RenderCommand {
    /// View the frame belongs to.
    pub fn view(&self) -> View {
        self.frame.view
    }

    /// Whether the parking-guide lines are drawn.
    pub fn has_guide_overlay(&self) -> bool {
        self.frame.has_guide_overlay()
    }
}

/// Outcome of one [`tick`](crate::machine::NavigationStateMachine::tick).
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Tick {
    /// Nothing for the driver to do.
    Continue,
    /// A confirmed tap changed what is on screen.
    Render(RenderCommand),
    /// A quit was observed while waiting for a press; stop the loop.
    Quit,
}

impl Tick {
    /// The render command, if this tick produced one.
    pub fn into_command(self) -> Option<RenderCommand> {
        match self {
            Self::Render(cmd) => Some(cmd),
            Self::Continue | Self::Quit => None,
        }
    }
}
