// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use carmonitor_layout::scene::{ClockTime, compose};
use carmonitor_layout::{Geometry, Layout, View};
use carmonitor_nav::machine::NavigationStateMachine;
use carmonitor_nav::types::{Event, Tick};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample points every `step` pixels across the whole screen.
fn screen_grid(geometry: &Geometry, step: usize) -> Vec<(i32, i32)> {
    let w = i32::try_from(geometry.screen_width).unwrap();
    let h = i32::try_from(geometry.screen_height).unwrap();
    let mut out = Vec::new();
    for y in (0..h).step_by(step) {
        for x in (0..w).step_by(step) {
            out.push((x, y));
        }
    }
    out
}

/// One full tap on `(x, y)` followed by a quit.
fn tap(x: i32, y: i32, debounce: u32) -> VecDeque<Event> {
    let mut events = VecDeque::new();
    events.push_back(Event::PointerDown { x, y });
    events.extend((0..debounce).map(|_| Event::None));
    events.push_back(Event::PointerUp { x, y });
    events.push_back(Event::Quit);
    events
}

fn bench_hit_test(c: &mut Criterion) {
    let layout = Layout::default();
    let points = screen_grid(layout.geometry(), 4);
    let mut group = c.benchmark_group("hit_test");
    group.throughput(Throughput::Elements(points.len() as u64));
    for view in View::ALL {
        group.bench_function(format!("{view:?}"), |b| {
            b.iter(|| {
                for &(x, y) in &points {
                    black_box(layout.hit_test(black_box(x), black_box(y), view));
                }
            });
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let geometry = Geometry::default();
    let clock = ClockTime::default();
    let mut group = c.benchmark_group("compose");
    for view in View::ALL {
        group.bench_function(format!("{view:?}"), |b| {
            b.iter(|| black_box(compose(&geometry, view, true, clock)));
        });
    }
    group.finish();
}

fn bench_tap_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("tap_cycle");
    for debounce in [1_u32, 60] {
        group.bench_function(format!("debounce_{debounce}"), |b| {
            b.iter_batched(
                || {
                    let machine = NavigationStateMachine::default().with_debounce_ticks(debounce);
                    (machine, tap(60, 60, debounce))
                },
                |(mut machine, mut input)| {
                    let mut rendered = 0;
                    loop {
                        match machine.tick(&mut input) {
                            Tick::Continue => {}
                            Tick::Render(cmd) => {
                                black_box(cmd);
                                rendered += 1;
                            }
                            Tick::Quit => break,
                        }
                    }
                    assert_eq!(rendered, 1, "one tap, one frame");
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_compose, bench_tap_cycle);
criterion_main!(benches);
