use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

use island_core::prelude::*;
use island_logic::difficulty::Difficulty;

fn round(difficulty: Difficulty) -> GameEngine {
    let mut engine = GameEngine::new(42);
    engine.reset_round(difficulty);
    engine
}

/// One second of play with the player walking right
fn bench_one_second(c: &mut Criterion) {
    let input = PlayerInput::from_keys(false, false, false, true, false);
    for difficulty in Difficulty::all() {
        c.bench_function(&format!("one_second_{}", difficulty.name()), |b| {
            b.iter_batched(
                || round(*difficulty),
                |mut engine| {
                    for _ in 0..60 {
                        engine.update(black_box(1.0 / 60.0), &input);
                    }
                    engine.drain_events()
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_reset_round(c: &mut Criterion) {
    let mut engine = GameEngine::new(7);
    c.bench_function("reset_round_nightmare", |b| {
        b.iter(|| engine.reset_round(black_box(Difficulty::Nightmare)));
    });
}

fn bench_save(c: &mut Criterion) {
    let engine = round(Difficulty::Nightmare);
    c.bench_function("save_round", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(4096);
            let _ = engine.save(&mut buffer);
            buffer
        });
    });
}

criterion_group!(benches, bench_one_second, bench_reset_round, bench_save);
criterion_main!(benches);
