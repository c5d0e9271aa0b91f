use benchy::{sweep, Vector};
use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup,
    BenchmarkId, Criterion, Throughput,
};

// Dynamic growth through repeated appends, starting from an empty container
fn push(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_push");
    for size in sweep::default_sizes() {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("benchy", size), &size, |b, &size| {
            b.iter(|| {
                let mut v = Vector::new();
                for i in 0..size {
                    v.push(i as i32);
                }
                v
            })
        });
        group.bench_with_input(BenchmarkId::new("std", size), &size, |b, &size| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..size {
                    v.push(i as i32);
                }
                v
            })
        });
    }
    group.finish();
}

fn access_loop(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, size: usize, v: &[i32]) {
    group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
        b.iter(|| {
            for i in 0..size {
                black_box(v[i]);
            }
        })
    });
}

// Sequential indexed reads over a prefilled container
fn access(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_access");
    for size in sweep::default_sizes() {
        group.throughput(Throughput::Elements(size as u64));

        let ours: Vector<i32> = (0..size as i32).collect();
        group.bench_with_input(BenchmarkId::new("benchy", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size {
                    // SAFETY: i < size == ours.len()
                    black_box(unsafe { *ours.get_unchecked(i) });
                }
            })
        });

        let theirs: Vec<i32> = (0..size as i32).collect();
        access_loop(&mut group, "std", size, &theirs);
        access_loop(&mut group, "benchy-checked", size, &ours);
    }
    group.finish();
}

criterion_group!(benches, push, access);
criterion_main!(benches);
