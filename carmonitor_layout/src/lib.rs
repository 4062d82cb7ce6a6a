// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Car Monitor Layout: screen geometry, hit testing and scene composition for
//! the in-vehicle kiosk.
//!
//! ## Overview
//!
//! The kiosk has four [`View`]s: a multi-panel overview and three full-screen
//! single-feed views. Everything tappable on screen is a [`Region`] in a
//! [`Layout`] table built from a [`Geometry`].
//!
//! - [`Layout::hit_test`] maps a tap and the current view to a [`ControlId`].
//!   It is pure; it never changes the view.
//! - [`ControlId::destination`] tells the caller which view a control leads to.
//! - [`scene::compose`] describes the layers to draw for a view.
//!
//! Rectangles are half-open: a tap on the far edge of a rectangle misses it.
//!
//! ## Minimal usage
//!
//! ```
//! use carmonitor_layout::{ControlId, Layout, View};
//!
//! let layout = Layout::default();
//!
//! let hit = layout.hit_test(60, 60, View::MainOverview);
//! assert_eq!(hit, ControlId::FrontCameraPanel);
//! assert_eq!(hit.destination(), Some(View::FrontCamera));
//!
//! // The same spot is the back button once a camera is full screen.
//! assert_eq!(layout.hit_test(60, 60, View::FrontCamera), ControlId::BackButton);
//! ```
//!
//! ## Composing a frame
//!
//! ```
//! use carmonitor_layout::scene::{compose, Chrome, ClockTime};
//! use carmonitor_layout::{Geometry, View};
//!
//! let frame = compose(&Geometry::default(), View::RearCamera, true, ClockTime::default());
//! assert!(frame.chrome.contains(Chrome::BACK_BUTTON | Chrome::GUIDE_OVERLAY));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geometry;
pub mod layout;
pub mod scene;
pub mod types;

pub use geometry::{Geometry, GeometryError};
pub use layout::{Layout, Region};
pub use types::{ControlId, View, ViewSet};
