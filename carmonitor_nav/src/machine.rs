// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state machine.
//!
//! ## Overview
//!
//! One [`tick`](NavigationStateMachine::tick) per loop iteration. Each tick
//! does at most one of: sample one event, advance the debounce counter, or
//! confirm a tap.
//!
//! ## Debounce
//!
//! - [`Idle`](DebounceState::Idle): sample input. A quit ends the loop; a
//!   pointer-down starts the hold with the counter at zero.
//! - [`Pressed`](DebounceState::Pressed): count ticks without sampling input.
//!   When the counter reaches the threshold, move on.
//! - [`Released`](DebounceState::Released): sample input. A pointer-up is a
//!   confirmed tap; anything else, quit included, is dropped.
//!
//! ## Confirmed taps
//!
//! The tap is hit-tested against the current view. A control with a
//! destination switches view, hides the parking guides and yields a
//! [`FullView`](CommandKind::FullView) command. The parking-guide toggle on the
//! rear view flips the overlay and yields an
//! [`OverlayToggle`](CommandKind::OverlayToggle) command. Dead space does
//! nothing.

use carmonitor_layout::scene::{ClockTime, compose};
use carmonitor_layout::{ControlId, Layout, View};
use tracing::{debug, trace};

use crate::collab::InputSource;
use crate::types::{CommandKind, DebounceState, Event, RenderCommand, Tick};

/// Ticks a press is held off before its release is honoured.
pub const DEFAULT_DEBOUNCE_TICKS: u32 = 60;

/// Owns the current view, the parking-guide flag, and the debounce cycle.
///
/// ## Usage
///
/// - Construct with [`NavigationStateMachine::new`] and present
///   [`current_frame`](Self::current_frame) once at startup.
/// - Call [`tick`](Self::tick) from the driving loop and forward any
///   [`Tick::Render`] command to the renderer. Stop on [`Tick::Quit`].
/// - Optionally feed wall-clock readings through [`set_clock`](Self::set_clock).
#[derive(Clone, Debug)]
pub struct NavigationStateMachine {
    layout: Layout,
    debounce_ticks: u32,
    view: View,
    guides_visible: bool,
    debounce: DebounceState,
    clock: ClockTime,
}

impl Default for NavigationStateMachine {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl NavigationStateMachine {
    /// Start on the overview with the guides hidden.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            debounce_ticks: DEFAULT_DEBOUNCE_TICKS,
            view: View::MainOverview,
            guides_visible: false,
            debounce: DebounceState::Idle,
            clock: ClockTime::default(),
        }
    }

    /// Use a different hold time.
    pub fn with_debounce_ticks(mut self, ticks: u32) -> Self {
        self.debounce_ticks = ticks;
        self
    }

    /// Start from a given clock reading.
    pub fn with_clock(mut self, clock: ClockTime) -> Self {
        self.clock = clock;
        self
    }

    /// The layout used for hit testing.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Hold time in ticks.
    pub fn debounce_ticks(&self) -> u32 {
        self.debounce_ticks
    }

    /// The active view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Whether the parking-guide overlay is shown. Always `false` outside the
    /// rear view.
    pub fn guides_visible(&self) -> bool {
        self.guides_visible
    }

    /// Where the press → release cycle currently is.
    pub fn debounce_state(&self) -> DebounceState {
        self.debounce
    }

    /// Clock reading used for the overview.
    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    /// A full-view command for whatever is on screen now.
    pub fn current_frame(&self) -> RenderCommand {
        self.command(CommandKind::FullView)
    }

    /// Advance by one tick.
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &mut I) -> Tick {
        match self.debounce {
            DebounceState::Idle => match input.poll_event() {
                Event::Quit => {
                    debug!("quit requested");
                    Tick::Quit
                }
                Event::PointerDown { x, y } => {
                    trace!(x, y, "pointer down, holding");
                    self.debounce = DebounceState::Pressed(0);
                    Tick::Continue
                }
                Event::PointerUp { .. } | Event::None => Tick::Continue,
            },
            DebounceState::Pressed(count) => {
                let count = count.saturating_add(1);
                if count >= self.debounce_ticks {
                    trace!(count, "hold elapsed, waiting for release");
                    self.debounce = DebounceState::Released;
                } else {
                    self.debounce = DebounceState::Pressed(count);
                }
                Tick::Continue
            }
            DebounceState::Released => match input.poll_event() {
                Event::PointerUp { x, y } => {
                    self.debounce = DebounceState::Idle;
                    match self.confirm_click(x, y) {
                        Some(cmd) => Tick::Render(cmd),
                        None => Tick::Continue,
                    }
                }
                Event::Quit | Event::PointerDown { .. } | Event::None => Tick::Continue,
            },
        }
    }

    /// Act on a confirmed tap at `(x, y)`.
    ///
    /// This is the only place the view and the overlay flag change. Returns the
    /// command to present, or `None` when the tap hit dead space.
    pub fn confirm_click(&mut self, x: i32, y: i32) -> Option<RenderCommand> {
        let previous = self.view;
        let control = self.layout.hit_test(x, y, previous);

        if let Some(next) = control.destination() {
            self.view = next;
            self.guides_visible = false;
            debug!(?previous, ?next, ?control, "view changed");
            return Some(self.command(CommandKind::FullView));
        }

        if previous == View::RearCamera && control == ControlId::ParkingGuideToggle {
            self.guides_visible = !self.guides_visible;
            debug!(visible = self.guides_visible, "parking guides toggled");
            return Some(self.command(CommandKind::OverlayToggle));
        }

        trace!(x, y, view = ?previous, "tap on dead space");
        None
    }

    /// Update the clock reading.
    ///
    /// Returns a redraw of the overview when the reading changed while the
    /// overview is on screen.
    pub fn set_clock(&mut self, clock: ClockTime) -> Option<RenderCommand> {
        if clock == self.clock {
            return None;
        }
        self.clock = clock;
        (self.view == View::MainOverview).then(|| self.command(CommandKind::FullView))
    }

    fn command(&self, kind: CommandKind) -> RenderCommand {
        RenderCommand {
            kind,
            frame: compose(
                self.layout.geometry(),
                self.view,
                self.guides_visible,
                self.clock,
            ),
        }
    }
}
