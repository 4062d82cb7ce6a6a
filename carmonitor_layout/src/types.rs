// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layout: views, controls and view sets.

/// The screen currently shown on the monitor.
///
/// Exactly one view is active at a time. It is the only persistent piece of
/// navigation state; everything else is derived from it per frame.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum View {
    /// Multi-panel overview: front and rear camera previews, the Android-Auto
    /// mirror and the clock.
    #[default]
    MainOverview,
    /// Full-screen front camera.
    FrontCamera,
    /// Full-screen rear camera with the parking-guide toggle.
    RearCamera,
    /// Full-screen Android-Auto mirror.
    AndroidAuto,
}

impl View {
    /// All views, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::MainOverview,
        Self::FrontCamera,
        Self::RearCamera,
        Self::AndroidAuto,
    ];

    /// Whether this is one of the full-screen single-feed views.
    pub const fn is_single(self) -> bool {
        !matches!(self, Self::MainOverview)
    }

    /// The singleton [`ViewSet`] for this view.
    pub const fn as_set(self) -> ViewSet {
        match self {
            Self::MainOverview => ViewSet::MAIN_OVERVIEW,
            Self::FrontCamera => ViewSet::FRONT_CAMERA,
            Self::RearCamera => ViewSet::REAR_CAMERA,
            Self::AndroidAuto => ViewSet::ANDROID_AUTO,
        }
    }
}

/// Logical control under a tap.
///
/// Produced by [`Layout::hit_test`](crate::Layout::hit_test) for every tap and
/// never stored. Panel controls only ever come back for
/// [`View::MainOverview`]; button controls only for the single views.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ControlId {
    /// Dead space.
    #[default]
    None,
    /// Back arrow in the top-left corner of the single views.
    BackButton,
    /// Parking-guide toggle in the top-right corner of the rear view.
    ParkingGuideToggle,
    /// Front camera preview in the overview.
    FrontCameraPanel,
    /// Rear camera preview in the overview.
    RearCameraPanel,
    /// Android-Auto preview in the overview.
    AndroidAutoPanel,
}

impl ControlId {
    /// The view a tap on this control navigates to, if any.
    ///
    /// Panels open their dedicated view and the back button returns to the
    /// overview. The parking-guide toggle and dead space do not navigate.
    pub const fn destination(self) -> Option<View> {
        match self {
            Self::FrontCameraPanel => Some(View::FrontCamera),
            Self::RearCameraPanel => Some(View::RearCamera),
            Self::AndroidAutoPanel => Some(View::AndroidAuto),
            Self::BackButton => Some(View::MainOverview),
            Self::ParkingGuideToggle | Self::None => None,
        }
    }

    /// Views in which this control may legitimately be reported.
    pub const fn allowed_views(self) -> ViewSet {
        match self {
            Self::FrontCameraPanel | Self::RearCameraPanel | Self::AndroidAutoPanel => {
                ViewSet::MAIN_OVERVIEW
            }
            Self::BackButton => ViewSet::SINGLE,
            Self::ParkingGuideToggle => ViewSet::REAR_CAMERA,
            Self::None => ViewSet::all(),
        }
    }
}

bitflags::bitflags! {
    /// A set of views in which a layout region is active.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewSet: u8 {
        /// [`View::MainOverview`].
        const MAIN_OVERVIEW = 0b0000_0001;
        /// [`View::FrontCamera`].
        const FRONT_CAMERA  = 0b0000_0010;
        /// [`View::RearCamera`].
        const REAR_CAMERA   = 0b0000_0100;
        /// [`View::AndroidAuto`].
        const ANDROID_AUTO  = 0b0000_1000;
        /// Every full-screen single-feed view.
        const SINGLE = Self::FRONT_CAMERA.bits() | Self::REAR_CAMERA.bits() | Self::ANDROID_AUTO.bits();
    }
}

impl ViewSet {
    /// Whether `view` is a member of this set.
    pub const fn includes(self, view: View) -> bool {
        self.contains(view.as_set())
    }
}
