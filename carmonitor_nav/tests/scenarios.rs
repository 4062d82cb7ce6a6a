// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end navigation scenarios driven through scripts.

use carmonitor_layout::View;
use carmonitor_layout::scene::{Chrome, Layer, Media};
use carmonitor_nav::collab::{InputSource, RecordingRenderer, Renderer};
use carmonitor_nav::machine::{DEFAULT_DEBOUNCE_TICKS, NavigationStateMachine};
use carmonitor_nav::script::{Script, ScriptedInput};
use carmonitor_nav::types::{CommandKind, DebounceState, Event, RenderCommand, Tick};

/// Tick until quit (or `limit` ticks), presenting every command.
fn run(
    machine: &mut NavigationStateMachine,
    input: &mut impl InputSource,
    limit: usize,
) -> Vec<RenderCommand> {
    let mut renderer = RecordingRenderer::new();
    for _ in 0..limit {
        match machine.tick(input) {
            Tick::Continue => {}
            Tick::Render(cmd) => renderer.present(&cmd).unwrap(),
            Tick::Quit => break,
        }
    }
    renderer.take()
}

fn scripted(text: &str) -> ScriptedInput {
    ScriptedInput::new(Script::parse(text).unwrap())
}

/// Press, hold for the default threshold, release.
fn tap_script(x: i32, y: i32) -> String {
    format!("down {x} {y}\nidle {DEFAULT_DEBOUNCE_TICKS}\nup {x} {y}\n")
}

#[test]
fn front_camera_end_to_end() {
    let mut machine = NavigationStateMachine::default();
    let mut input = scripted(&tap_script(60, 60));
    let commands = run(&mut machine, &mut input, 1_000);

    assert_eq!(machine.view(), View::FrontCamera);
    assert_eq!(commands.len(), 1);
    let cmd = &commands[0];
    assert_eq!(cmd.kind, CommandKind::FullView);
    assert_eq!(cmd.view(), View::FrontCamera);
    let geometry = machine.layout().geometry();
    assert_eq!(
        cmd.frame.layers,
        vec![
            Layer::image(Media::CameraFrame, geometry.full_screen()),
            Layer::image(Media::BackArrow, geometry.back_button()),
        ]
    );
}

#[test]
fn release_before_threshold_is_not_honoured_early() {
    let mut machine = NavigationStateMachine::default();
    // The release is already queued right behind the press.
    let mut input = scripted("down 60 60\nup 60 60\n");

    assert_eq!(machine.tick(&mut input), Tick::Continue);
    for i in 0..DEFAULT_DEBOUNCE_TICKS - 1 {
        assert_eq!(machine.tick(&mut input), Tick::Continue);
        assert_eq!(machine.debounce_state(), DebounceState::Pressed(i + 1));
        assert_eq!(machine.view(), View::MainOverview);
    }

    // Exactly at the threshold the machine becomes eligible.
    assert_eq!(machine.tick(&mut input), Tick::Continue);
    assert_eq!(machine.debounce_state(), DebounceState::Released);
    assert_eq!(machine.view(), View::MainOverview);

    let cmd = machine.tick(&mut input).into_command().unwrap();
    assert_eq!(cmd.view(), View::FrontCamera);
}

#[test]
fn parking_guide_round_trip() {
    let mut machine = NavigationStateMachine::default();
    let script = [tap_script(100, 400), tap_script(720, 50), tap_script(720, 50)].concat();
    let commands = run(&mut machine, &mut scripted(&script), 1_000);

    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0].kind, CommandKind::FullView);
    assert_eq!(commands[0].view(), View::RearCamera);
    assert!(!commands[0].has_guide_overlay());

    let toggles = &commands[1..];
    assert!(toggles
        .iter()
        .all(|c| c.kind == CommandKind::OverlayToggle && c.view() == View::RearCamera));
    assert!(toggles[0].has_guide_overlay());
    assert!(!toggles[1].has_guide_overlay());
    assert_ne!(toggles[0].has_guide_overlay(), toggles[1].has_guide_overlay());
    // The overlay goes on top of the base frame, back button and toggle.
    assert_eq!(
        toggles[0].frame.layers.last().and_then(Layer::media),
        Some(Media::GuideOverlay)
    );
    assert!(toggles[1]
        .frame
        .chrome
        .contains(Chrome::BACK_BUTTON | Chrome::GUIDE_TOGGLE));
    assert!(!machine.guides_visible());
}

#[test]
fn leaving_rear_view_clears_overlay() {
    let mut machine = NavigationStateMachine::default();
    let script = [tap_script(100, 400), tap_script(720, 50)].concat();
    let _ = run(&mut machine, &mut scripted(&script), 1_000);
    assert_eq!(machine.view(), View::RearCamera);
    assert!(machine.guides_visible());

    let script = [tap_script(50, 50), tap_script(100, 400)].concat();
    let commands = run(&mut machine, &mut scripted(&script), 1_000);
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].view(), View::MainOverview);
    assert!(commands[0].frame.chrome.contains(Chrome::CLOCK));
    assert_eq!(machine.view(), View::RearCamera);
    assert!(!machine.guides_visible());
    assert!(!commands[1].has_guide_overlay());
}

#[test]
fn quit_mid_cycle_is_ignored_until_idle() {
    let mut machine = NavigationStateMachine::default().with_debounce_ticks(5);
    // Quit arrives while waiting for the release; it is dropped, and the
    // trailing quit after the script ends the run.
    let mut input = scripted("down 60 60\nidle 5\nquit\nup 600 60\n");
    let commands = run(&mut machine, &mut input, 100);
    assert_eq!(commands.len(), 1);
    assert_eq!(machine.view(), View::AndroidAuto);
    assert!(input.is_exhausted());
}

#[test]
fn quit_before_any_tap() {
    let mut machine = NavigationStateMachine::default();
    let mut input = scripted("idle 3\nquit\ndown 60 60\n");
    let mut ticks = 0;
    while machine.tick(&mut input) != Tick::Quit {
        ticks += 1;
    }
    assert_eq!(ticks, 3);
    assert_eq!(machine.view(), View::MainOverview);
    assert!(!input.is_exhausted());
}

#[test]
fn identical_streams_give_identical_outcomes() {
    let script = [
        tap_script(600, 60),
        tap_script(45, 45),
        tap_script(100, 400),
        tap_script(720, 50),
        "idle 17\ndown 0 0\nidle 3\nup 400 450\n".to_string(),
    ]
    .concat();

    let mut a = NavigationStateMachine::default();
    let mut b = NavigationStateMachine::default();
    let first = run(&mut a, &mut scripted(&script), 10_000);
    let second = run(&mut b, &mut scripted(&script), 10_000);
    assert_eq!(first, second);
    assert_eq!(a.view(), b.view());
    assert_eq!(a.guides_visible(), b.guides_visible());
    assert_eq!(first.len(), 4);
    assert_eq!(a.view(), View::RearCamera);
    assert!(a.guides_visible());
}

#[test]
fn events_between_taps_do_not_leak() {
    let mut machine = NavigationStateMachine::default().with_debounce_ticks(2);
    let mut input: std::collections::VecDeque<Event> = [
        Event::PointerUp { x: 60, y: 60 },
        Event::None,
        Event::PointerDown { x: 700, y: 400 },
    ]
    .into_iter()
    .collect();
    let commands = run(&mut machine, &mut input, 10);
    assert!(commands.is_empty());
    assert_eq!(machine.view(), View::MainOverview);
    assert_eq!(machine.debounce_state(), DebounceState::Released);
}
