//! Decode throughput across the three policies.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use silt_core::policy::{CurationPolicy, Steady, Stretched, Tilted};

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_ingest_times");
    for s in [64u64, 1024, 1 << 16] {
        let t = 3 * s + 7;
        group.bench_function(format!("steady/{s}"), |b| {
            b.iter(|| Steady::lookup_ingest_times(black_box(s), black_box(t)).unwrap());
        });
        group.bench_function(format!("stretched/{s}"), |b| {
            b.iter(|| Stretched::lookup_ingest_times(black_box(s), black_box(t)).unwrap());
        });
        group.bench_function(format!("tilted/{s}"), |b| {
            b.iter(|| Tilted::lookup_ingest_times(black_box(s), black_box(t)).unwrap());
        });
    }
    group.finish();
}

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_storage_site");
    let s = 1024u64;
    group.bench_function("steady", |b| {
        b.iter(|| {
            (0..4096u64)
                .filter_map(|t| Steady::assign_storage_site(black_box(s), t))
                .count()
        });
    });
    group.bench_function("stretched", |b| {
        b.iter(|| {
            (0..4096u64)
                .filter_map(|t| Stretched::assign_storage_site(black_box(s), t))
                .count()
        });
    });
    group.bench_function("tilted", |b| {
        b.iter(|| {
            (0..4096u64)
                .filter_map(|t| Tilted::assign_storage_site(black_box(s), t))
                .count()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_assign);
criterion_main!(benches);
