//! Benchmarks for the per-frame game update path

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kendo_core::{GameConfig, GestureSymbol, Point, Tick, Wrists};
use kendo_game::GameEngine;

/// Engine in Playing state with a saturated slot array.
fn loaded_engine() -> (GameEngine, Tick) {
    let config = GameConfig {
        spawn_interval_ms: 1,
        fall_speed: 0.001,
        ..GameConfig::default()
    };
    let mut engine = GameEngine::with_seed(config, 42);
    let wrists = Wrists::new(Point::new(0.1, 0.8), Point::new(0.9, 0.8));

    let mut now = Tick::from_millis(100);
    engine.update(GestureSymbol::BothArmsRaised, wrists, now);
    for _ in 0..16 {
        now = now.advance(33);
        engine.update(GestureSymbol::None, wrists, now);
    }

    (engine, now)
}

fn bench_update_idle(c: &mut Criterion) {
    let (mut engine, mut now) = loaded_engine();
    let wrists = Wrists::new(Point::new(0.1, 0.8), Point::new(0.9, 0.8));

    c.bench_function("engine_update_idle", |b| {
        b.iter(|| {
            now = now.advance(33);
            engine.update(black_box(GestureSymbol::None), black_box(wrists), now);
        })
    });
}

fn bench_update_slicing(c: &mut Criterion) {
    let (mut engine, mut now) = loaded_engine();
    let wrists = Wrists::new(Point::new(0.1, 0.8), Point::new(0.5, 0.1));

    c.bench_function("engine_update_slicing", |b| {
        b.iter(|| {
            now = now.advance(33);
            engine.update(
                black_box(GestureSymbol::SwordSideSlash),
                black_box(wrists),
                now,
            );
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let (engine, now) = loaded_engine();

    c.bench_function("engine_snapshot", |b| {
        b.iter(|| black_box(engine.snapshot(black_box(now))))
    });
}

criterion_group!(benches, bench_update_idle, bench_update_slicing, bench_snapshot);
criterion_main!(benches);
