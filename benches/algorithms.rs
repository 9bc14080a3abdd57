//! Throughput benchmarks for the four decision algorithms' `allow_at` hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tenant_ratelimit::algorithm::{FixedWindowState, LeakyBucketState, SlidingWindowState, TokenBucketState};

fn bench_token_bucket(c: &mut Criterion) {
    let mut state = TokenBucketState::new(1_000, 60.0, 0.0);
    let mut t = 0.0;
    c.bench_function("token_bucket_allow_at", |b| {
        b.iter(|| {
            t += 0.001;
            black_box(state.allow_at(black_box(t)))
        })
    });
}

fn bench_leaky_bucket(c: &mut Criterion) {
    let mut state = LeakyBucketState::new(1_000, 60.0, 0.0);
    let mut t = 0.0;
    c.bench_function("leaky_bucket_allow_at", |b| {
        b.iter(|| {
            t += 0.001;
            black_box(state.allow_at(black_box(t)))
        })
    });
}

fn bench_fixed_window(c: &mut Criterion) {
    let mut state = FixedWindowState::new(1_000, 60.0, 0.0);
    let mut t = 0.0;
    c.bench_function("fixed_window_allow_at", |b| {
        b.iter(|| {
            t += 0.001;
            black_box(state.allow_at(black_box(t)))
        })
    });
}

fn bench_sliding_window(c: &mut Criterion) {
    let mut state = SlidingWindowState::new(1_000, 60.0, 0.0);
    let mut t = 0.0;
    c.bench_function("sliding_window_allow_at", |b| {
        b.iter(|| {
            t += 0.001;
            black_box(state.allow_at(black_box(t)))
        })
    });
}

criterion_group!(benches, bench_token_bucket, bench_leaky_bucket, bench_fixed_window, bench_sliding_window);
criterion_main!(benches);
