// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test basics.
//!
//! Prints the layout table for the stock 800 × 480 screen, then classifies a
//! few taps in every view, including the far edges that fall just outside a
//! rectangle.
//!
//! Run:
//! - `cargo run -p carmonitor_demos --example hit_test_basics`

use carmonitor_layout::{Layout, View};
use kurbo::Rect;

fn fmt_rect(r: Rect) -> String {
    format!("({}, {}) .. ({}, {})", r.x0, r.y0, r.x1, r.y1)
}

fn main() {
    let layout = Layout::default();

    println!("== Layout table ==");
    for region in layout.regions() {
        println!(
            "{:<20} {:<36} views={:?}",
            format!("{:?}", region.control),
            fmt_rect(region.rect),
            region.views
        );
    }

    let taps = [(60, 60), (240, 100), (239, 159), (60, 340), (600, 60), (720, 50), (400, 400)];
    for view in View::ALL {
        println!("\n== {view:?} ==");
        for (x, y) in taps {
            println!("  tap ({x:>3}, {y:>3}) -> {:?}", layout.hit_test(x, y, view));
        }
    }
}
