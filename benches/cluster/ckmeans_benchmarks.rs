use ckmeans_dp::{cluster, CkmeansConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn random_values(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1_000.0..1_000.0)).collect()
}

fn benchmark_varying_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("ckmeans_values");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let k = 16;
    for n in [1_000, 10_000, 100_000].iter() {
        let values = random_values(*n, 42);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("serial", n), &values, |b, values| {
            let config = CkmeansConfig::new(k).with_parallel(false);
            b.iter(|| cluster(black_box(values), &config).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &values, |b, values| {
            let config = CkmeansConfig::new(k).with_parallel(true);
            b.iter(|| cluster(black_box(values), &config).unwrap());
        });
    }
    group.finish();
}

fn benchmark_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("ckmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let values = random_values(20_000, 7);
    for k in [2, 8, 32, 128].iter() {
        group.throughput(Throughput::Elements(*k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            let config = CkmeansConfig::new(k).with_parallel(false);
            b.iter(|| cluster(black_box(&values), &config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_varying_values,
    benchmark_varying_clusters
);
criterion_main!(benches);
