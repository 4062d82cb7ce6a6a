// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen geometry: the handful of sizes every rectangle on screen derives from.

use kurbo::{Rect, Size};

/// Pixel dimensions of the kiosk screen and its fixed widgets.
///
/// All layout and scene rectangles are computed from these values, so a
/// different panel can be described without touching the hit test or the
/// scene builder. [`Geometry::default`] is the 800 × 480 car monitor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Geometry {
    /// Screen width in pixels.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Width of a camera preview panel in the overview.
    pub video_width: u32,
    /// Height of a camera preview panel in the overview.
    pub video_height: u32,
    /// Margin between the screen edge and panels/buttons.
    pub offset: u32,
    /// Edge length of the square buttons in the single views.
    pub button_size: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 480,
            video_width: 200,
            video_height: 120,
            offset: 40,
            button_size: 50,
        }
    }
}

/// Reasons a [`Geometry`] cannot produce a usable layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A size that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroExtent(&'static str),
    /// The overview panels overlap or leave the screen along an axis.
    #[error("overview panels do not fit the screen {0}")]
    PanelsDoNotFit(&'static str),
    /// The back button and the parking-guide toggle overlap or leave the screen.
    #[error("buttons do not fit the screen width")]
    ButtonsDoNotFit,
}

impl Geometry {
    /// Check that every derived rectangle is non-empty, on screen, and
    /// disjoint from the others that share its view.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let extents = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("video_width", self.video_width),
            ("video_height", self.video_height),
            ("button_size", self.button_size),
        ];
        for (what, value) in extents {
            if value == 0 {
                return Err(GeometryError::ZeroExtent(what));
            }
        }

        let offset = u64::from(self.offset);
        // Front/Android-Auto share a row; front/rear share a column.
        if 2 * offset + 2 * u64::from(self.video_width) > u64::from(self.screen_width) {
            return Err(GeometryError::PanelsDoNotFit("horizontally"));
        }
        if 2 * offset + 2 * u64::from(self.video_height) > u64::from(self.screen_height) {
            return Err(GeometryError::PanelsDoNotFit("vertically"));
        }
        if 2 * offset + 2 * u64::from(self.button_size) > u64::from(self.screen_width)
            || offset + u64::from(self.button_size) > u64::from(self.screen_height)
        {
            return Err(GeometryError::ButtonsDoNotFit);
        }
        Ok(())
    }

    /// Full screen size.
    pub fn screen_size(&self) -> Size {
        Size::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }

    /// The whole screen.
    pub fn full_screen(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.screen_size())
    }

    fn video_size(&self) -> Size {
        Size::new(f64::from(self.video_width), f64::from(self.video_height))
    }

    fn button(&self) -> Size {
        let side = f64::from(self.button_size);
        Size::new(side, side)
    }

    fn offset(&self) -> f64 {
        f64::from(self.offset)
    }

    /// Front camera panel: top-left of the overview.
    pub fn front_panel(&self) -> Rect {
        Rect::from_origin_size((self.offset(), self.offset()), self.video_size())
    }

    /// Rear camera panel: bottom-left, same column as the front panel.
    pub fn rear_panel(&self) -> Rect {
        let y = f64::from(self.screen_height) - self.offset() - f64::from(self.video_height);
        Rect::from_origin_size((self.offset(), y), self.video_size())
    }

    /// Android-Auto panel: top-right of the overview.
    pub fn android_auto_panel(&self) -> Rect {
        let x = f64::from(self.screen_width) - self.offset() - f64::from(self.video_width);
        Rect::from_origin_size((x, self.offset()), self.video_size())
    }

    /// Back button: top-left of the single views.
    pub fn back_button(&self) -> Rect {
        Rect::from_origin_size((self.offset(), self.offset()), self.button())
    }

    /// Parking-guide toggle: top-right of the rear view.
    pub fn guide_toggle(&self) -> Rect {
        let x = f64::from(self.screen_width) - self.offset() - f64::from(self.button_size);
        Rect::from_origin_size((x, self.offset()), self.button())
    }
}
