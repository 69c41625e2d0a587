use bucket_map::hash::bucket_index;
use bucket_map::BucketMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

const N: usize = 10_000;

// Shared prefixes and dense suffixes, the shape that stresses a polynomial
// string hash the most.
fn user_key(i: usize) -> String {
    format!("user:{:05}", i)
}

fn filled(n: usize) -> BucketMap<u64> {
    (0..n).map(|i| (user_key(i), i as u64)).collect()
}

/// Index of the longest chain under the map's current bucket count.
fn fullest_bucket(m: &BucketMap<u64>) -> usize {
    let mut lens = vec![0usize; m.bucket_count()];
    for k in m.keys() {
        lens[bucket_index(k, m.bucket_count())] += 1;
    }
    (0..lens.len()).max_by_key(|&i| lens[i]).unwrap_or(0)
}

fn bench_set(c: &mut Criterion) {
    c.bench_function("bucket_map_set_10k_from_default", |b| {
        let keys: Vec<_> = (0..N).map(user_key).collect();
        b.iter_batched(
            BucketMap::<u64>::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.set(k.as_str(), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_overwrite(c: &mut Criterion) {
    c.bench_function("bucket_map_overwrite", |b| {
        let mut m = filled(N);
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % N;
            black_box(m.set(user_key(i), 0));
        })
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("bucket_map_get_hit", |b| {
        let m = filled(2 * N);
        let keys: Vec<_> = (0..2 * N).map(user_key).collect();
        let mut it = keys.iter().cycle();
        b.iter(|| black_box(m.get(it.next().unwrap())))
    });
}

// Misses that hash into the longest chain, so every lookup scans it fully.
fn bench_get_miss_long_chain(c: &mut Criterion) {
    c.bench_function("bucket_map_get_miss_long_chain", |b| {
        let m = filled(N);
        let target = fullest_bucket(&m);
        let misses: Vec<String> = (0..)
            .map(|i| format!("absent:{}", i))
            .filter(|k| bucket_index(k, m.bucket_count()) == target)
            .take(64)
            .collect();
        let mut it = misses.iter().cycle();
        b.iter(|| black_box(m.get(it.next().unwrap())))
    });
}

// Starts from one bucket, so early keys all chain together and the table
// doubles ten times on the way to 1k entries.
fn bench_set_from_one_bucket(c: &mut Criterion) {
    c.bench_function("bucket_map_set_1k_from_one_bucket", |b| {
        let keys: Vec<_> = (0..1_000).map(user_key).collect();
        b.iter_batched(
            || BucketMap::<u64>::with_buckets(1, 1.0).unwrap(),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.set(k.as_str(), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("bucket_map_remove_reinsert", |b| {
        let mut m = filled(N);
        let mut i = 0;
        b.iter(|| {
            i = (i + 7) % N;
            let k = user_key(i);
            black_box(m.remove(&k));
            m.set(k, 1);
        })
    });
}

fn bench_entries_walk(c: &mut Criterion) {
    c.bench_function("bucket_map_entries_walk_10k", |b| {
        let m = filled(N);
        b.iter(|| black_box(m.entries().map(|(_, v)| *v).fold(0u64, u64::wrapping_add)))
    });
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .sample_size(40)
        .measurement_time(Duration::from_secs(5))
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_set, bench_set_from_one_bucket, bench_overwrite, bench_get_hit,
        bench_get_miss_long_chain, bench_remove_reinsert, bench_entries_walk
}
criterion_main!(benches);
