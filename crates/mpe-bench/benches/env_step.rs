//! Criterion benchmarks for full environment steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mpe_bench::{reference_profile, spread_profile, uniform_actions};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_step_reference(c: &mut Criterion) {
    let mut env = reference_profile(42).unwrap();
    env.reset().unwrap();
    let actions = uniform_actions(&env, &mut ChaCha8Rng::seed_from_u64(0));

    c.bench_function("step_simple_reference", |b| {
        b.iter(|| {
            let result = env.step(&actions).unwrap();
            black_box(&result);
        });
    });
}

fn bench_step_spread_3(c: &mut Criterion) {
    let mut env = spread_profile(3, 42).unwrap();
    env.reset().unwrap();
    let actions = uniform_actions(&env, &mut ChaCha8Rng::seed_from_u64(0));

    c.bench_function("step_simple_spread_3", |b| {
        b.iter(|| {
            let result = env.step(&actions).unwrap();
            black_box(&result);
        });
    });
}

fn bench_step_spread_30(c: &mut Criterion) {
    let mut env = spread_profile(30, 42).unwrap();
    env.reset().unwrap();
    let actions = uniform_actions(&env, &mut ChaCha8Rng::seed_from_u64(0));

    c.bench_function("step_simple_spread_30", |b| {
        b.iter(|| {
            let result = env.step(&actions).unwrap();
            black_box(&result);
        });
    });
}

fn bench_episode_reference(c: &mut Criterion) {
    c.bench_function("episode_100_simple_reference", |b| {
        b.iter(|| {
            let mut env = reference_profile(42).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            env.reset().unwrap();
            for _ in 0..100 {
                let actions = uniform_actions(&env, &mut rng);
                black_box(env.step(&actions).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_step_reference,
    bench_step_spread_3,
    bench_step_spread_30,
    bench_episode_reference
);
criterion_main!(benches);
