//! Benchmarks for the multi-start harness: store contention, shared-engine
//! sampling, region splitting, and a small end-to-end search.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use multistart::objectives::rastrigin;
use multistart::{
    make_splits, LocalMinimum, MultistartBuilder, ObjectiveFn, Region, SharedResultStore,
    SharedRng, Solution,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn values(n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    (0..n).map(|_| rng.random_range(0.0..1.0)).collect()
}

fn solution(v: f64) -> Solution {
    Solution::new(vec![v, v], v, vec![v, v], v).unwrap()
}

fn bench_store_insert(c: &mut Criterion) {
    let vals = values(10_000);
    let mut group = c.benchmark_group("store_insert");

    for capacity in [4usize, 64, 1024] {
        group.bench_with_input(
            BenchmarkId::new("single_thread", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let store = SharedResultStore::new(f64::NEG_INFINITY, capacity).unwrap();
                    for &v in &vals {
                        store.insert(solution(v));
                    }
                    black_box(store.num_attempts())
                })
            },
        );
    }

    for threads in [2usize, 8] {
        group.bench_with_input(
            BenchmarkId::new("contended", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let store = SharedResultStore::new(f64::NEG_INFINITY, 16).unwrap();
                    std::thread::scope(|s| {
                        for chunk in vals.chunks(vals.len() / threads) {
                            let store = &store;
                            s.spawn(move || {
                                for &v in chunk {
                                    store.insert(solution(v));
                                }
                            });
                        }
                    });
                    black_box(store.num_attempts())
                })
            },
        );
    }
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let region = Region::cube(10, -5.0, 5.0).unwrap();
    let rng: SharedRng<ChaCha8Rng> = SharedRng::seed_from_u64(1);
    let mut local = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("sample_10d_shared_engine", |b| {
        b.iter(|| black_box(region.sample(&mut &rng)))
    });
    c.bench_function("sample_10d_local_engine", |b| {
        b.iter(|| black_box(region.sample(&mut local)))
    });
}

fn bench_make_splits(c: &mut Criterion) {
    let region = Region::new(vec![0.0, 0.0, 0.0], vec![128.0, 256.0, 512.0]).unwrap();
    let mut group = c.benchmark_group("make_splits");
    for generations in [4u32, 8, 12] {
        group.bench_with_input(
            BenchmarkId::from_parameter(generations),
            &generations,
            |b, &g| b.iter(|| black_box(make_splits(g, vec![region.clone()]).len())),
        );
    }
    group.finish();
}

fn stay(objective: &ObjectiveFn<'_>, x: &mut [f64]) -> LocalMinimum {
    LocalMinimum::without_steps(objective(x))
}

fn bench_search(c: &mut Criterion) {
    let region = Region::cube(2, -5.12, 5.12).unwrap();
    c.bench_function("search_rastrigin_1000_attempts", |b| {
        b.iter(|| {
            let results = MultistartBuilder::new(rastrigin, stay, region.clone())
                .desired_min(f64::NEG_INFINITY)
                .workers(4)
                .max_attempts(1000)
                .seed(3)
                .minimize()
                .unwrap();
            black_box(results.num_attempts)
        })
    });
}

criterion_group!(
    benches,
    bench_store_insert,
    bench_sampling,
    bench_make_splits,
    bench_search
);
criterion_main!(benches);
