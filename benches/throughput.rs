use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vqr_turn_rng::{GeneratorConfig, HmacDrbg, MockOsSource, VqrTurnRng};

fn bench_drbg_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_drbg_generate");
    let mut drbg = HmacDrbg::new(&[0x42; 32]).unwrap();

    for size in [32usize, 1024, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| drbg.generate(black_box(size)))
        });
    }
    group.finish();
}

fn bench_random_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_bytes");
    // Interval large enough that reseeds stay out of the steady state
    let rng = VqrTurnRng::new(1 << 30).unwrap();

    for size in [32usize, 4096, 65536] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| rng.random_bytes(black_box(size)).unwrap())
        });
    }
    group.finish();
}

fn bench_reseed(c: &mut Criterion) {
    let rng = VqrTurnRng::with_source(GeneratorConfig::default(), Box::new(MockOsSource::new()))
        .unwrap();

    c.bench_function("reseed", |b| b.iter(|| rng.reseed().unwrap()));
}

criterion_group!(benches, bench_drbg_generate, bench_random_bytes, bench_reseed);
criterion_main!(benches);
