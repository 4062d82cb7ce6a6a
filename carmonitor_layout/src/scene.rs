// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene composition: what to draw for each view.
//!
//! ## Overview
//!
//! A [`Frame`] is an ordered list of [`Layer`]s, back to front, plus an optional
//! clear colour. It only describes *what* goes where; loading images and
//! issuing draw calls is the renderer's business.
//!
//! [`compose`] builds the frame for a view from a [`Geometry`], the
//! parking-guide flag and the clock reading.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::geometry::Geometry;
use crate::types::View;

/// Horizontal origins of the five clock slots: two digits, colon, two digits.
pub const CLOCK_SLOTS_X: [u32; 5] = [220, 280, 355, 400, 460];
/// Vertical origin of the clock row.
pub const CLOCK_Y: u32 = 190;
/// Edge length of a clock glyph.
pub const CLOCK_GLYPH_SIZE: u32 = 100;

/// Overview background colour, cleared before any layer is drawn.
pub const OVERVIEW_CLEAR: Rgb = Rgb::new(0x36, 0x53, 0x82);

const DIGIT_FILES: [&str; 10] = [
    "media/0.png",
    "media/1.png",
    "media/2.png",
    "media/3.png",
    "media/4.png",
    "media/5.png",
    "media/6.png",
    "media/7.png",
    "media/8.png",
    "media/9.png",
];

/// An opaque RGB colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Static images the kiosk draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Media {
    /// Overview wallpaper.
    Background,
    /// Back arrow button.
    BackArrow,
    /// Parking-guide toggle button.
    GuideButton,
    /// Full-screen parking-guide lines.
    GuideOverlay,
    /// Android-Auto preview in the overview.
    AndroidAutoPreview,
    /// Rear camera preview in the overview.
    RearCameraPreview,
    /// Full-screen camera frame (front and rear views).
    CameraFrame,
    /// Full-screen Android-Auto frame.
    AndroidAutoFrame,
    /// Clock digit glyph; values above nine wrap.
    ClockDigit(u8),
    /// Clock colon glyph.
    ClockColon,
}

impl Media {
    /// Path of the image, relative to the kiosk's working directory.
    pub fn path(self) -> &'static str {
        match self {
            Self::Background => "media/bg2.jpg",
            Self::BackArrow => "media/arrow.png",
            Self::GuideButton | Self::GuideOverlay => "media/guides.png",
            Self::AndroidAutoPreview => "media/androidAuto.jpeg",
            Self::RearCameraPreview | Self::CameraFrame => "media/cam3.jpg",
            Self::AndroidAutoFrame => "media/cam2.jpg",
            Self::ClockDigit(d) => DIGIT_FILES[usize::from(d % 10)],
            Self::ClockColon => "media/colon.png",
        }
    }
}

/// Live video feeds that a layer can show instead of a still image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Streaming front camera texture in the overview.
    FrontCamera,
}

/// What a layer shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// A still image.
    Image(Media),
    /// A streaming texture.
    Feed(Feed),
}

/// One drawable layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layer {
    /// Content to draw.
    pub source: Source,
    /// Destination rectangle in screen space.
    pub rect: Rect,
}

impl Layer {
    /// A still-image layer.
    pub const fn image(media: Media, rect: Rect) -> Self {
        Self {
            source: Source::Image(media),
            rect,
        }
    }

    /// The image shown by this layer, if it is not a feed.
    pub fn media(&self) -> Option<Media> {
        match self.source {
            Source::Image(m) => Some(m),
            Source::Feed(_) => None,
        }
    }
}

bitflags::bitflags! {
    /// Interactive affordances and overlays present in a frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Chrome: u8 {
        /// Back arrow is drawn.
        const BACK_BUTTON   = 0b0000_0001;
        /// Parking-guide toggle button is drawn.
        const GUIDE_TOGGLE  = 0b0000_0010;
        /// Parking-guide lines are drawn over the camera frame.
        const GUIDE_OVERLAY = 0b0000_0100;
        /// Clock glyphs are drawn.
        const CLOCK         = 0b0000_1000;
    }
}

/// Wall-clock reading shown in the overview, hours and minutes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl Default for ClockTime {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 59,
        }
    }
}

impl ClockTime {
    /// Create a reading; `None` if `hour > 23` or `minute > 59`.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            None
        } else {
            Some(Self { hour, minute })
        }
    }

    /// Hour, 0–23.
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Minute, 0–59.
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Same reading on a 12-hour dial (midnight and noon show as 12).
    pub const fn twelve_hour(self) -> Self {
        let h = self.hour % 12;
        Self {
            hour: if h == 0 { 12 } else { h },
            minute: self.minute,
        }
    }

    /// The four displayed digits, `HH` then `MM`.
    pub const fn digits(self) -> [u8; 4] {
        [
            self.hour / 10,
            self.hour % 10,
            self.minute / 10,
            self.minute % 10,
        ]
    }
}

/// A complete description of one presented frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// View this frame belongs to.
    pub view: View,
    /// Colour to clear to before drawing, if any.
    pub clear: Option<Rgb>,
    /// Layers, back to front.
    pub layers: Vec<Layer>,
    /// Affordances present in `layers`.
    pub chrome: Chrome,
}

impl Frame {
    /// Whether the parking-guide lines are part of this frame.
    pub fn has_guide_overlay(&self) -> bool {
        self.chrome.contains(Chrome::GUIDE_OVERLAY)
    }

    /// Whether any layer shows `media`.
    pub fn shows(&self, media: Media) -> bool {
        self.layers.iter().any(|l| l.media() == Some(media))
    }
}

/// Build the frame for `view`.
///
/// `guides_visible` is only consulted for [`View::RearCamera`] and `clock`
/// only for [`View::MainOverview`].
pub fn compose(geometry: &Geometry, view: View, guides_visible: bool, clock: ClockTime) -> Frame {
    match view {
        View::MainOverview => compose_overview(geometry, clock),
        View::FrontCamera => compose_single(geometry, view, Media::CameraFrame, false),
        View::RearCamera => compose_single(geometry, view, Media::CameraFrame, guides_visible),
        View::AndroidAuto => compose_single(geometry, view, Media::AndroidAutoFrame, false),
    }
}

fn compose_overview(geometry: &Geometry, clock: ClockTime) -> Frame {
    let mut layers = Vec::with_capacity(4 + CLOCK_SLOTS_X.len());
    layers.push(Layer::image(Media::Background, geometry.full_screen()));
    layers.push(Layer {
        source: Source::Feed(Feed::FrontCamera),
        rect: geometry.front_panel(),
    });
    layers.push(Layer::image(
        Media::RearCameraPreview,
        geometry.rear_panel(),
    ));
    layers.push(Layer::image(
        Media::AndroidAutoPreview,
        geometry.android_auto_panel(),
    ));

    let [h1, h2, m1, m2] = clock.digits();
    let glyphs = [
        Media::ClockDigit(h1),
        Media::ClockDigit(h2),
        Media::ClockColon,
        Media::ClockDigit(m1),
        Media::ClockDigit(m2),
    ];
    let side = f64::from(CLOCK_GLYPH_SIZE);
    for (glyph, x) in glyphs.into_iter().zip(CLOCK_SLOTS_X) {
        let rect = Rect::from_origin_size((f64::from(x), f64::from(CLOCK_Y)), (side, side));
        layers.push(Layer::image(glyph, rect));
    }

    Frame {
        view: View::MainOverview,
        clear: Some(OVERVIEW_CLEAR),
        layers,
        chrome: Chrome::CLOCK,
    }
}

fn compose_single(geometry: &Geometry, view: View, frame: Media, guides_visible: bool) -> Frame {
    let mut layers = Vec::with_capacity(4);
    layers.push(Layer::image(frame, geometry.full_screen()));
    layers.push(Layer::image(Media::BackArrow, geometry.back_button()));
    let mut chrome = Chrome::BACK_BUTTON;

    if view == View::RearCamera {
        layers.push(Layer::image(Media::GuideButton, geometry.guide_toggle()));
        chrome |= Chrome::GUIDE_TOGGLE;
        if guides_visible {
            layers.push(Layer::image(Media::GuideOverlay, geometry.full_screen()));
            chrome |= Chrome::GUIDE_OVERLAY;
        }
    }

    Frame {
        view,
        clear: None,
        layers,
        chrome,
    }
}
