// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery navigation and gesture handling.
//!
//! Measures the performance of:
//! - Cyclical navigation through a large gallery (render + sizing request per step)
//! - Intelligent sizing computations
//! - A burst of drag moves on a zoomed image

use criterion::{criterion_group, criterion_main, Criterion};
use iced_core::{Point, Size};
use lens_overlay::config::OverlayConfig;
use lens_overlay::media::ImageModel;
use lens_overlay::ui::geometry::{constrain_pan, optimal_dimensions, PanLayout};
use lens_overlay::ui::gesture::{InputEvent, InteractionTarget};
use lens_overlay::ui::navigation::Direction;
use lens_overlay::ui::overlay::{HeadlessSurface, OverlaySession};
use std::hint::black_box;
use std::time::Instant;

fn gallery(count: usize) -> Vec<ImageModel> {
    (0..count)
        .map(|i| ImageModel::new(format!("image-{i}.png"), format!("Image {i}")))
        .collect()
}

/// Full cycle through a 500 image gallery.
fn bench_navigate_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");

    group.bench_function("navigate_full_cycle", |b| {
        b.iter(|| {
            let mut session =
                OverlaySession::new(HeadlessSurface::default(), OverlayConfig::default());
            session.show_gallery(gallery(500), 0);
            for _ in 0..500 {
                session.navigate(Direction::Next);
            }
            black_box(session.take_notifications().len());
        });
    });

    group.finish();
}

/// Sizing for a spread of aspect ratios on desktop and mobile viewports.
fn bench_optimal_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let naturals = [
        Size::new(4000.0, 3000.0),
        Size::new(1080.0, 1920.0),
        Size::new(512.0, 512.0),
        Size::new(120.0, 80.0),
    ];
    let viewports = [Size::new(1920.0, 1080.0), Size::new(390.0, 844.0)];

    group.bench_function("optimal_dimensions", |b| {
        b.iter(|| {
            for natural in naturals {
                for viewport in viewports {
                    black_box(optimal_dimensions(black_box(natural), black_box(viewport)));
                }
            }
        });
    });

    group.bench_function("constrain_pan", |b| {
        let layout = PanLayout::fitted(Size::new(1216.0, 608.0));
        b.iter(|| {
            black_box(constrain_pan(
                black_box(3.5),
                black_box(iced_core::Vector::new(900.0, -700.0)),
                layout,
            ))
        });
    });

    group.finish();
}

/// One drag of 200 moves on a zoomed image.
fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");

    group.bench_function("drag_200_moves", |b| {
        b.iter(|| {
            let now = Instant::now();
            let mut session =
                OverlaySession::new(HeadlessSurface::default(), OverlayConfig::default());
            session.show(ImageModel::new("a.png", "A"));
            session.set_layout(PanLayout::fitted(Size::new(1000.0, 700.0)));
            for _ in 0..20 {
                session.handle_input(
                    InputEvent::WheelScrolled {
                        target: InteractionTarget::Image,
                        delta: iced_core::mouse::ScrollDelta::Lines { x: 0.0, y: 1.0 },
                    },
                    now,
                );
            }
            session.handle_input(
                InputEvent::PointerPressed {
                    target: InteractionTarget::Image,
                    position: Point::new(0.0, 0.0),
                },
                now,
            );
            for i in 0..200u16 {
                let offset = f32::from(i);
                session.handle_input(
                    InputEvent::PointerMoved {
                        position: Point::new(offset, offset / 2.0),
                    },
                    now,
                );
            }
            session.handle_input(InputEvent::PointerReleased, now);
            black_box(session.zoom().translate);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_navigate_cycle,
    bench_optimal_dimensions,
    bench_drag
);
criterion_main!(benches);
