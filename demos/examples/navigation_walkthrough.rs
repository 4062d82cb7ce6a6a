// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation walkthrough.
//!
//! Replays a short touch script through the state machine and prints every
//! render command it emits: open the rear camera, show and hide the parking
//! guides, go back, then open Android-Auto.
//!
//! Run:
//! - `cargo run -p carmonitor_demos --example navigation_walkthrough`

use carmonitor_nav::collab::{RecordingRenderer, Renderer};
use carmonitor_nav::machine::NavigationStateMachine;
use carmonitor_nav::script::{Script, ScriptedInput};
use carmonitor_nav::types::Tick;

const SCRIPT: &str = "\
# rear camera panel
down 60 340
idle 60
up 60 340
# parking guides on, then off
down 720 50
idle 60
up 720 50
down 720 50
idle 60
up 720 50
# back, then Android-Auto
down 50 50
idle 60
up 50 50
down 600 60
idle 60
up 600 60
quit
";

fn main() {
    let script = match Script::parse(SCRIPT) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let mut input = ScriptedInput::new(script);
    let mut machine = NavigationStateMachine::default();
    let mut renderer = RecordingRenderer::new();

    let Ok(()) = renderer.present(&machine.current_frame());
    let mut ticks = 0_u64;
    loop {
        ticks += 1;
        match machine.tick(&mut input) {
            Tick::Continue => {}
            Tick::Render(cmd) => {
                let Ok(()) = renderer.present(&cmd);
            }
            Tick::Quit => break,
        }
    }

    println!("== {} frames in {ticks} ticks ==", renderer.commands().len());
    for (i, cmd) in renderer.commands().iter().enumerate() {
        println!(
            "{i}: {:?} {:?} layers={} guides={}",
            cmd.kind,
            cmd.view(),
            cmd.frame.layers.len(),
            cmd.has_guide_overlay()
        );
    }
}
