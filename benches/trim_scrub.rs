// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for trim-strip handle dragging.

use criterion::{criterion_group, criterion_main, Criterion};
use iced_shutter::ui::trim::{Message, State, StripEvent};
use iced::{Point, Rectangle, Size};
use std::hint::black_box;

fn strip_bounds() -> Rectangle {
    Rectangle::new(Point::ORIGIN, Size::new(640.0, 90.0))
}

/// A full in-handle drag sweep across the strip.
fn bench_handle_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim_scrub");

    group.bench_function("in_handle_sweep_1k", |b| {
        b.iter(|| {
            let mut state = State::new(60.0);
            let bounds = strip_bounds();
            state.update(Message::Strip {
                event: StripEvent::Pressed(Point::new(0.0, 45.0)),
                bounds,
            });
            for x in 0..1_000 {
                state.update(Message::Strip {
                    event: StripEvent::Moved(Point::new(x as f32 * 0.5, 45.0)),
                    bounds,
                });
            }
            state.update(Message::Strip {
                event: StripEvent::Released,
                bounds,
            });
            black_box(state.selection());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_handle_drag);
criterion_main!(benches);
