// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless renderer.
//!
//! Resolves every layer's image against the media root and logs what would be
//! drawn where. Image headers are probed once per file and cached, so a missing
//! or unreadable asset is reported once and then skipped.

use std::collections::HashMap;
use std::convert::Infallible;
use std::path::PathBuf;

use carmonitor_layout::scene::{Layer, Media, Source};
use carmonitor_nav::collab::Renderer;
use carmonitor_nav::types::RenderCommand;
use tracing::{debug, info, warn};

use crate::error::InitError;

/// Pixel size of a decoded asset, or `None` if it could not be read.
type Probe = Option<(u32, u32)>;

/// [`Renderer`] that presents frames to the log.
#[derive(Debug)]
pub(crate) struct HeadlessRenderer {
    root: PathBuf,
    probes: HashMap<&'static str, Probe>,
    presented: u64,
}

impl HeadlessRenderer {
    /// Renderer reading assets below `root`.
    pub(crate) fn new(root: impl Into<PathBuf>) -> Result<Self, InitError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(InitError::MediaDir(root));
        }
        Ok(Self {
            root,
            probes: HashMap::new(),
            presented: 0,
        })
    }

    /// Frames presented so far.
    pub(crate) fn presented(&self) -> u64 {
        self.presented
    }

    fn probe(&mut self, media: Media) -> Probe {
        let root = &self.root;
        *self.probes.entry(media.path()).or_insert_with(|| {
            let path = root.join(media.path());
            match image::image_dimensions(&path) {
                Ok(size) => Some(size),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "media unavailable");
                    None
                }
            }
        })
    }

    fn draw(&mut self, index: usize, layer: &Layer) {
        let r = layer.rect;
        match layer.source {
            Source::Image(media) => match self.probe(media) {
                Some((w, h)) => debug!(
                    index,
                    file = media.path(),
                    image_w = w,
                    image_h = h,
                    x = r.x0,
                    y = r.y0,
                    w = r.width(),
                    h = r.height(),
                    "draw"
                ),
                None => debug!(index, file = media.path(), "skip"),
            },
            Source::Feed(feed) => debug!(
                index,
                ?feed,
                x = r.x0,
                y = r.y0,
                w = r.width(),
                h = r.height(),
                "stream"
            ),
        }
    }
}

impl Renderer for HeadlessRenderer {
    type Error = Infallible;

    fn present(&mut self, command: &RenderCommand) -> Result<(), Self::Error> {
        let frame = &command.frame;
        if let Some(c) = frame.clear {
            debug!(r = c.r, g = c.g, b = c.b, "clear");
        }
        for (i, layer) in frame.layers.iter().enumerate() {
            self.draw(i, layer);
        }
        self.presented += 1;
        info!(
            kind = ?command.kind,
            view = ?frame.view,
            layers = frame.layers.len(),
            guides = frame.has_guide_overlay(),
            "frame presented"
        );
        Ok(())
    }
}
