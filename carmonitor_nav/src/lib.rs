// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Car Monitor Navigation: a deterministic, `no_std` input-debouncing and
//! view-navigation state machine for the kiosk.
//!
//! ## Overview
//!
//! [`NavigationStateMachine`](crate::machine::NavigationStateMachine) owns the
//! current [`View`](carmonitor_layout::View) and the parking-guide flag. A
//! driving loop calls [`tick`](crate::machine::NavigationStateMachine::tick)
//! repeatedly; each call samples at most one event from an
//! [`InputSource`](crate::collab::InputSource) and returns a
//! [`Tick`](crate::types::Tick).
//!
//! ## Debounce
//!
//! A pointer-down starts a hold of a fixed number of ticks (60 by default)
//! during which input is not sampled. Only then is a pointer-up accepted as a
//! confirmed tap. Outcomes depend only on the event stream and the tick count,
//! so identical runs give identical results.
//!
//! ## Rendering
//!
//! Confirmed taps that change the screen produce a
//! [`RenderCommand`](crate::types::RenderCommand): an ordered list of layers
//! for a [`Renderer`](crate::collab::Renderer) to draw. The machine never
//! loads images or draws anything itself, and it never returns errors: taps on
//! dead space and irrelevant events are silently ignored.
//!
//! ## Example
//!
//! ```
//! use std::collections::VecDeque;
//!
//! use carmonitor_layout::View;
//! use carmonitor_nav::machine::NavigationStateMachine;
//! use carmonitor_nav::types::{CommandKind, Event, Tick};
//!
//! let mut machine = NavigationStateMachine::default();
//! let mut input: VecDeque<Event> = VecDeque::new();
//!
//! input.push_back(Event::PointerDown { x: 60, y: 60 });
//! let _ = machine.tick(&mut input);
//! for _ in 0..60 {
//!     let _ = machine.tick(&mut input);
//! }
//! input.push_back(Event::PointerUp { x: 60, y: 60 });
//!
//! let Tick::Render(cmd) = machine.tick(&mut input) else {
//!     panic!("tap was not confirmed");
//! };
//! assert_eq!(cmd.kind, CommandKind::FullView);
//! assert_eq!(machine.view(), View::FrontCamera);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod collab;
pub mod machine;
pub mod script;
pub mod types;
