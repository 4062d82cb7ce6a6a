// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout table and the hit test over it.
//!
//! ## Overview
//!
//! A [`Layout`] is a flat list of [`Region`]s, each naming the control it
//! represents, the rectangle it covers, and the set of views it is active in.
//! [`Layout::hit_test`] walks the regions active for the current view and
//! returns the first control whose rectangle contains the tap.
//!
//! Containment is half-open, `[x0, x1) × [y0, y1)`, so a tap on the far edge of
//! a rectangle is outside it and adjacent rectangles never both claim a pixel.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::geometry::Geometry;
use crate::types::{ControlId, View, ViewSet};

/// One tappable rectangle in the layout table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Views in which the region responds to taps.
    pub views: ViewSet,
    /// Control reported when the region is hit.
    pub control: ControlId,
    /// Screen-space bounds.
    pub rect: Rect,
}

/// Data-driven layout table for the kiosk screen.
///
/// Built from a [`Geometry`]; regions are stored in a fixed order so the hit
/// test is deterministic even if a custom geometry makes rectangles touch.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    geometry: Geometry,
    regions: Vec<Region>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Geometry::default())
    }
}

impl Layout {
    /// Build the layout table for `geometry`.
    ///
    /// The geometry is not validated here; call [`Geometry::validate`] first
    /// when it comes from user input.
    pub fn new(geometry: Geometry) -> Self {
        let regions = alloc::vec![
            Region {
                views: ViewSet::MAIN_OVERVIEW,
                control: ControlId::FrontCameraPanel,
                rect: geometry.front_panel(),
            },
            Region {
                views: ViewSet::MAIN_OVERVIEW,
                control: ControlId::RearCameraPanel,
                rect: geometry.rear_panel(),
            },
            Region {
                views: ViewSet::MAIN_OVERVIEW,
                control: ControlId::AndroidAutoPanel,
                rect: geometry.android_auto_panel(),
            },
            Region {
                views: ViewSet::SINGLE,
                control: ControlId::BackButton,
                rect: geometry.back_button(),
            },
            Region {
                views: ViewSet::REAR_CAMERA,
                control: ControlId::ParkingGuideToggle,
                rect: geometry.guide_toggle(),
            },
        ];
        Self { geometry, regions }
    }

    /// Geometry the table was built from.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// All regions, in hit-test order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions active in `view`.
    pub fn regions_for(&self, view: View) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter().filter(move |r| r.views.includes(view))
    }

    /// The rectangle of `control` in `view`, if the control exists there.
    pub fn rect_of(&self, control: ControlId, view: View) -> Option<Rect> {
        self.regions_for(view)
            .find(|r| r.control == control)
            .map(|r| r.rect)
    }

    /// Map a tap to the control under it.
    ///
    /// Pure: the view is only read. The caller decides what to do with the
    /// result, typically via [`ControlId::destination`].
    pub fn hit_test(&self, x: i32, y: i32, view: View) -> ControlId {
        let pt = Point::new(f64::from(x), f64::from(y));
        self.regions_for(view)
            .filter(|r| r.control.allowed_views().includes(view))
            .find(|r| r.rect.contains(pt))
            .map_or(ControlId::None, |r| r.control)
    }
}
