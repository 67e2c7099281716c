//! Benchmarks for the CPU-side particle pool.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use embers::{ParticleDraw, ParticleSystem};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut system = ParticleSystem::seeded(count, 1).unwrap();
            system.emit();
            b.iter(|| system.update(black_box(0.01)))
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    for count in [1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut system = ParticleSystem::seeded(count, 1).unwrap();
            b.iter(|| system.emit())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut system = ParticleSystem::seeded(10_000, 1).unwrap();
    system.emit();
    let mut draws: Vec<ParticleDraw> = Vec::with_capacity(10_000);

    c.bench_function("render_10000", |b| {
        b.iter(|| {
            draws.clear();
            system.render(&mut draws);
            black_box(draws.len())
        })
    });
}

criterion_group!(benches, bench_update, bench_emit, bench_render);
criterion_main!(benches);
