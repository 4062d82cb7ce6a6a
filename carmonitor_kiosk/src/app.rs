// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The kiosk run loop and its assembly from configuration.

use std::io::{self, BufReader};
use std::thread;
use std::time::Duration;

use carmonitor_layout::Layout;
use carmonitor_layout::scene::ClockTime;
use carmonitor_nav::collab::{InputSource, Renderer};
use carmonitor_nav::machine::NavigationStateMachine;
use carmonitor_nav::script::{Script, ScriptedInput};
use carmonitor_nav::types::{DebounceState, RenderCommand, Tick};
use chrono::Timelike;
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::config::{ClockConfig, KioskConfig};
use crate::error::InitError;
use crate::input::LineInput;
use crate::link::FrameLink;
use crate::render::HeadlessRenderer;

/// Where the overview clock reading comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ClockSource {
    /// Always the same reading.
    Fixed(ClockTime),
    /// Local wall clock.
    System {
        /// Show hours on a 12-hour dial.
        twelve_hour: bool,
    },
}

impl ClockSource {
    pub(crate) fn from_config(config: &ClockConfig) -> Self {
        if config.follow_system {
            Self::System {
                twelve_hour: config.twelve_hour,
            }
        } else {
            Self::Fixed(ClockTime::default())
        }
    }

    pub(crate) fn read(&self) -> ClockTime {
        match *self {
            Self::Fixed(t) => t,
            Self::System { twelve_hour } => {
                let now = chrono::Local::now();
                let t = u8::try_from(now.hour())
                    .ok()
                    .zip(u8::try_from(now.minute()).ok())
                    .and_then(|(h, m)| ClockTime::new(h, m))
                    .unwrap_or_default();
                if twelve_hour { t.twelve_hour() } else { t }
            }
        }
    }
}

/// Why the loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Shutdown {
    /// The input source asked to quit.
    Quit,
    /// The input source ended while a press was still being debounced.
    InputClosed,
    /// The configured tick limit was reached.
    TickBudget,
}

/// What a finished run did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) ticks: u64,
    pub(crate) frames: u64,
    pub(crate) bytes_received: u64,
    pub(crate) reason: Shutdown,
}

/// The navigation machine wired to its collaborators.
#[derive(Debug)]
pub(crate) struct Kiosk<I, R> {
    machine: NavigationStateMachine,
    input: I,
    renderer: R,
    link: Option<FrameLink>,
    clock: ClockSource,
    tick_interval: Duration,
    max_ticks: Option<u64>,
}

impl<I: InputSource, R: Renderer> Kiosk<I, R> {
    /// A kiosk that runs flat out, with a frozen clock, until input quits.
    pub(crate) fn new(machine: NavigationStateMachine, input: I, renderer: R) -> Self {
        let clock = ClockSource::Fixed(machine.clock());
        Self {
            machine,
            input,
            renderer,
            link: None,
            clock,
            tick_interval: Duration::ZERO,
            max_ticks: None,
        }
    }

    pub(crate) fn with_clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub(crate) fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub(crate) fn with_link(mut self, link: Option<FrameLink>) -> Self {
        self.link = link;
        self
    }

    #[cfg(test)]
    pub(crate) fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Present the initial frame, then tick until quit, end of input, or the
    /// tick budget.
    pub(crate) fn run(&mut self) -> Result<RunSummary, R::Error> {
        let mut frames = 0;
        let first = self.machine.current_frame();
        self.present(&first, &mut frames)?;

        let mut ticks = 0_u64;
        let reason = loop {
            if let Some(max) = self.max_ticks
                && ticks >= max
            {
                break Shutdown::TickBudget;
            }

            if let Some(cmd) = self.machine.set_clock(self.clock.read()) {
                self.present(&cmd, &mut frames)?;
            }

            let tick = self.machine.tick(&mut self.input);
            ticks += 1;
            match tick {
                Tick::Continue => {}
                Tick::Render(cmd) => self.present(&cmd, &mut frames)?,
                Tick::Quit => break Shutdown::Quit,
            }
            // The machine drops a quit mid-press; a closed source has nothing else.
            if self.input.is_closed() && self.machine.debounce_state() != DebounceState::Idle {
                info!(state = ?self.machine.debounce_state(), "input closed mid-press");
                break Shutdown::InputClosed;
            }

            self.pump_link();
            if !self.tick_interval.is_zero() {
                thread::sleep(self.tick_interval);
            }
        };

        let bytes_received = self.link.as_ref().map_or(0, FrameLink::received);
        Ok(RunSummary {
            ticks,
            frames,
            bytes_received,
            reason,
        })
    }

    fn present(&mut self, cmd: &RenderCommand, frames: &mut u64) -> Result<(), R::Error> {
        self.renderer.present(cmd)?;
        *frames += 1;
        Ok(())
    }

    fn pump_link(&mut self) {
        let Some(link) = &mut self.link else {
            return;
        };
        if link.is_closed() {
            return;
        }
        if let Err(e) = link.drain() {
            warn!(error = %e, received = link.received(), "frame link failed, continuing without it");
        }
    }
}

/// Build the kiosk described by `config`, reading input from `cli.script` or
/// stdin.
pub(crate) fn launch(
    cli: &Cli,
    config: &KioskConfig,
) -> Result<Kiosk<Box<dyn InputSource>, HeadlessRenderer>, InitError> {
    config.geometry.validate()?;
    let layout = Layout::new(config.geometry);
    debug!(geometry = ?config.geometry, "layout ready");

    let clock = ClockSource::from_config(&config.clock);
    let machine = NavigationStateMachine::new(layout)
        .with_debounce_ticks(config.navigation.debounce_ticks)
        .with_clock(clock.read());

    let renderer = HeadlessRenderer::new(&config.media.dir)?;

    let input: Box<dyn InputSource> = match &cli.script {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| InitError::ScriptRead {
                path: path.clone(),
                source,
            })?;
            let script = Script::parse(&text)?;
            info!(path = %path.display(), steps = script.steps().len(), "replaying input script");
            Box::new(ScriptedInput::new(script))
        }
        None => {
            info!("reading input from stdin");
            Box::new(LineInput::spawn(BufReader::new(io::stdin())).map_err(InitError::Input)?)
        }
    };

    let link = if config.ingest.enabled {
        Some(FrameLink::listen(
            config.ingest.port,
            config.ingest.accept_timeout(),
            config.ingest.dump_path.clone(),
        )?)
    } else {
        None
    };

    Ok(Kiosk::new(machine, input, renderer)
        .with_clock(clock)
        .with_tick_interval(config.navigation.tick_interval())
        .with_max_ticks(config.navigation.max_ticks)
        .with_link(link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carmonitor_layout::View;
    use carmonitor_nav::collab::RecordingRenderer;
    use carmonitor_nav::types::CommandKind;
    use std::path::PathBuf;

    fn scripted(text: &str) -> ScriptedInput {
        ScriptedInput::new(Script::parse(text).unwrap())
    }

    fn kiosk(text: &str) -> Kiosk<ScriptedInput, RecordingRenderer> {
        let machine = NavigationStateMachine::default().with_debounce_ticks(3);
        Kiosk::new(machine, scripted(text), RecordingRenderer::new())
    }

    #[test]
    fn presents_initial_frame_then_quits() {
        let mut k = kiosk("");
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::Quit);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.bytes_received, 0);
        let cmds = k.renderer().commands();
        assert_eq!(cmds[0].view(), View::MainOverview);
        assert_eq!(cmds[0].kind, CommandKind::FullView);
    }

    #[test]
    fn tap_reaches_the_renderer() {
        let mut k = kiosk("down 60 60\nidle 3\nup 60 60\n");
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::Quit);
        assert_eq!(summary.frames, 2);
        assert_eq!(k.renderer().commands()[1].view(), View::FrontCamera);
    }

    #[test]
    fn tick_budget_stops_an_endless_script() {
        let machine = NavigationStateMachine::default();
        let input = scripted("").with_trailing(carmonitor_nav::types::Event::None);
        let mut k = Kiosk::new(machine, input, RecordingRenderer::new()).with_max_ticks(Some(25));
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::TickBudget);
        assert_eq!(summary.ticks, 25);
        assert_eq!(summary.frames, 1);
    }

    #[test]
    fn script_ending_mid_press_stops_the_loop() {
        let machine = NavigationStateMachine::default();
        let mut k = Kiosk::new(machine, scripted("down 60 60\n"), RecordingRenderer::new())
            .with_max_ticks(Some(1_000_000));
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::InputClosed);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.frames, 1);
        assert_eq!(k.machine.view(), View::MainOverview);
    }

    #[test]
    fn script_ending_while_waiting_for_release_stops_the_loop() {
        // The queued quit is dropped by the machine; end of input still stops.
        let mut k = kiosk("down 60 60\nidle 3\nquit\n").with_max_ticks(Some(1_000_000));
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::InputClosed);
        assert_eq!(k.machine.debounce_state(), DebounceState::Released);
        assert_eq!(summary.frames, 1);
    }

    #[test]
    fn closed_stdin_mid_press_stops_the_loop() {
        let input = LineInput::spawn(std::io::Cursor::new("down 60 60\n")).unwrap();
        let mut k = Kiosk::new(NavigationStateMachine::default(), input, RecordingRenderer::new())
            .with_tick_interval(Duration::from_micros(100))
            .with_max_ticks(Some(100_000));
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::InputClosed);
        assert_eq!(summary.frames, 1);
    }

    #[test]
    fn frame_link_bytes_reach_the_summary() {
        let listener = std::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).unwrap();
        let addr = listener.local_addr().unwrap();
        let payload = vec![0x5a_u8; 40_000];
        let sent = payload.clone();
        let client = thread::spawn(move || {
            use std::io::Write;
            let mut s = std::net::TcpStream::connect(addr).unwrap();
            s.write_all(&sent).unwrap();
        });
        let link = FrameLink::accept(&listener, Duration::from_secs(5), None).unwrap();
        client.join().unwrap();

        let mut k = kiosk("idle 200\n")
            .with_tick_interval(Duration::from_millis(1))
            .with_link(Some(link));
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::Quit);
        assert_eq!(summary.bytes_received, payload.len() as u64);
        // A peer hang-up keeps the link and its count.
        let link = k.link.as_ref().unwrap();
        assert!(link.is_closed());
        assert_eq!(link.received(), payload.len() as u64);
    }

    #[test]
    fn clock_change_redraws_overview() {
        let machine = NavigationStateMachine::default();
        assert_eq!(machine.clock(), ClockTime::default());
        let later = ClockTime::new(13, 0).unwrap();
        let mut k = Kiosk::new(machine, scripted(""), RecordingRenderer::new())
            .with_clock(ClockSource::Fixed(later));
        let Ok(summary) = k.run();
        assert_eq!(summary.frames, 2);
        assert_eq!(k.machine.clock(), later);
    }

    #[test]
    fn fixed_clock_follows_config() {
        let fixed = ClockSource::from_config(&ClockConfig {
            follow_system: false,
            twelve_hour: true,
        });
        assert_eq!(fixed.read(), ClockTime::default());
        let ClockSource::System { twelve_hour } = ClockSource::from_config(&ClockConfig::default())
        else {
            panic!("system clock expected");
        };
        assert!(twelve_hour);
        let t = ClockSource::System { twelve_hour: true }.read();
        assert!((1..=12).contains(&t.hour()));
    }

    #[test]
    fn launch_rejects_bad_geometry() {
        let mut config = KioskConfig::default();
        config.geometry.screen_width = 0;
        let Err(err) = launch(&Cli::default(), &config) else {
            panic!("expected a geometry error");
        };
        assert!(matches!(err, InitError::Geometry(_)), "{err}");
    }

    #[test]
    fn launch_replays_a_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("taps.txt");
        std::fs::write(&script, "down 600 60\nidle 60\nup 600 60\n").unwrap();

        let mut config = KioskConfig::default();
        config.media.dir = dir.path().to_owned();
        config.clock.follow_system = false;
        config.navigation.tick_interval_us = 0;
        let cli = Cli {
            script: Some(script),
            ..Cli::default()
        };

        let mut k = launch(&cli, &config).unwrap();
        let Ok(summary) = k.run();
        assert_eq!(summary.reason, Shutdown::Quit);
        assert_eq!(summary.frames, 2);
        assert_eq!(k.machine.view(), View::AndroidAuto);
        assert_eq!(k.renderer().presented(), 2);
    }

    #[test]
    fn launch_reports_bad_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("taps.txt");
        std::fs::write(&script, "down 1 1\nwiggle\n").unwrap();
        let mut config = KioskConfig::default();
        config.media.dir = dir.path().to_owned();
        let cli = Cli {
            script: Some(script),
            ..Cli::default()
        };
        let Err(err) = launch(&cli, &config) else {
            panic!("expected a script error");
        };
        assert!(matches!(err, InitError::Script(_)), "{err}");

        let cli = Cli {
            script: Some(PathBuf::from("/nonexistent/taps.txt")),
            ..Cli::default()
        };
        let Err(err) = launch(&cli, &config) else {
            panic!("expected a read error");
        };
        assert!(matches!(err, InitError::ScriptRead { .. }), "{err}");
    }
}
