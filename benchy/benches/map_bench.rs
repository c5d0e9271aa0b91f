use benchy::{data, sweep, Map};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeMap;

// Integer keys 0..size, value = key, into a fresh container each iteration
fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");
    for size in sweep::default_sizes() {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("benchy", size), &size, |b, &size| {
            b.iter(|| {
                let mut m = Map::new();
                for i in 0..size as i32 {
                    *m.get_or_insert_default(i) = i;
                }
                m
            })
        });
        group.bench_with_input(BenchmarkId::new("std", size), &size, |b, &size| {
            b.iter(|| {
                let mut m = BTreeMap::new();
                for i in 0..size as i32 {
                    *m.entry(i).or_default() = i;
                }
                m
            })
        });
    }
    group.finish();
}

// Every key of a prefilled container is looked up once per iteration
fn lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_lookup");
    for size in sweep::default_sizes() {
        group.throughput(Throughput::Elements(size as u64));

        let ours: Map<i32, i32> = (0..size as i32).map(|i| (i, i)).collect();
        group.bench_with_input(BenchmarkId::new("benchy", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size as i32 {
                    black_box(ours.get(&i));
                }
            })
        });

        let theirs: BTreeMap<i32, i32> = (0..size as i32).map(|i| (i, i)).collect();
        group.bench_with_input(BenchmarkId::new("std", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size as i32 {
                    black_box(theirs.get(&i));
                }
            })
        });
    }
    group.finish();
}

// Random lowercase string keys, generated once per size outside the timing
fn string_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_string_insert");
    let mut rng = data::seeded_rng(None);
    for size in sweep::default_sizes() {
        group.throughput(Throughput::Elements(size as u64));
        let keys = data::random_strings(size, &mut rng);

        group.bench_with_input(BenchmarkId::new("benchy", size), &keys, |b, keys| {
            b.iter(|| {
                let mut m = Map::new();
                for (i, key) in keys.iter().enumerate() {
                    *m.get_or_insert_default(key.clone()) = i;
                }
                m
            })
        });
        group.bench_with_input(BenchmarkId::new("std", size), &keys, |b, keys| {
            b.iter(|| {
                let mut m = BTreeMap::new();
                for (i, key) in keys.iter().enumerate() {
                    *m.entry(key.clone()).or_default() = i;
                }
                m
            })
        });
    }
    group.finish();
}

criterion_group!(benches, insert, lookup, string_insert);
criterion_main!(benches);
