use criterion::measurement::WallTime;
use criterion::{
    BatchSize, BenchmarkGroup, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use strata_buffer::{Priority, PriorityBuffer};
use strata_perf::{make_full_buffer, make_mixed_ops};

fn bench_insert_free(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert (free slot)", |b| {
        b.iter_batched_ref(
            PriorityBuffer::<u8, 1024>::new,
            |buf| black_box(buf.insert(black_box(Priority::Mid), 7)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_insert_evicting(c: &mut Criterion) {
    let mut buf = make_full_buffer::<1024>();

    let mut group = c.benchmark_group("buffer");
    group.throughput(Throughput::Elements(1));

    // Full of HIGH after the first few hundred iterations, each insert then
    // overwrites its own level.
    group.bench_function("insert (full, evicting)", |b| {
        b.iter(|| black_box(buf.insert(black_box(Priority::High), 1)));
    });

    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    group.throughput(Throughput::Elements(1));

    group.bench_function("retrieve", |b| {
        b.iter_batched_ref(
            make_full_buffer::<1024>,
            |buf| black_box(buf.retrieve()),
            BatchSize::SmallInput,
        );
    });

    let mut empty = PriorityBuffer::<u8, 1024>::new();
    group.bench_function("retrieve (empty)", |b| {
        b.iter(|| black_box(empty.retrieve()));
    });

    group.finish();
}

fn mixed_at_capacity<const CAP: usize>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    ops: &[(Priority, u8)],
) {
    let mut buf = PriorityBuffer::<u8, CAP>::new();
    let mut idx = 0usize;
    group.bench_function(format!("insert_retrieve_cap_{CAP}"), |b| {
        b.iter(|| {
            let (p, v) = ops[idx % ops.len()];
            let _ = black_box(buf.insert(p, v));
            if idx % 3 == 0 {
                let _ = black_box(buf.retrieve());
            }
            idx += 1;
        });
    });
}

fn bench_mixed(c: &mut Criterion) {
    let ops = make_mixed_ops(4096);

    let mut group = c.benchmark_group("buffer_capacity");
    group.throughput(Throughput::Elements(1));

    mixed_at_capacity::<8>(&mut group, &ops);
    mixed_at_capacity::<64>(&mut group, &ops);
    mixed_at_capacity::<1024>(&mut group, &ops);

    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut buf = make_full_buffer::<1024>();

    let mut group = c.benchmark_group("buffer");
    group.bench_function("reset (cap 1024)", |b| {
        b.iter(|| buf.reset());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_free,
    bench_insert_evicting,
    bench_retrieve,
    bench_mixed,
    bench_reset,
);
criterion_main!(benches);
