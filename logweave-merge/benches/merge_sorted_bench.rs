// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::stream;
use logweave_core::{IterSource, LogEntry, StreamSource};
use logweave_merge::{merge_sorted, merge_sorted_async};
use logweave_test_utils::random_sources;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use tokio::runtime::Runtime;

const SHAPES: [(usize, usize); 3] = [(4, 10_000), (64, 1_000), (1_024, 100)];

fn fixture(sources: usize, max_len: usize) -> Vec<Vec<LogEntry>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    random_sources(&mut rng, sources, max_len)
}

pub fn bench_merge_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sorted");

    for &(sources, max_len) in &SHAPES {
        let data = fixture(sources, max_len);
        let total: usize = data.iter().map(Vec::len).sum();
        group.throughput(Throughput::Elements(total as u64));

        let id = BenchmarkId::from_parameter(format!("m{sources}_n{max_len}"));
        group.bench_with_input(id, &data, |bencher, data| {
            bencher.iter(|| {
                let sources = data.iter().cloned().map(IterSource::new).collect();
                let mut out = Vec::with_capacity(total);
                merge_sorted(sources, &mut out).unwrap();
                black_box(out)
            });
        });
    }

    group.finish();
}

pub fn bench_merge_sorted_async(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sorted_async");
    let rt = Runtime::new().unwrap();

    for &(sources, max_len) in &SHAPES {
        let data = fixture(sources, max_len);
        let total: usize = data.iter().map(Vec::len).sum();
        group.throughput(Throughput::Elements(total as u64));

        let id = BenchmarkId::from_parameter(format!("m{sources}_n{max_len}"));
        group.bench_with_input(id, &data, |bencher, data| {
            bencher.iter(|| {
                let sources = data
                    .iter()
                    .cloned()
                    .map(|records| StreamSource::new(stream::iter(records)))
                    .collect();
                let mut out = Vec::with_capacity(total);
                rt.block_on(merge_sorted_async(sources, &mut out)).unwrap();
                black_box(out)
            });
        });
    }

    group.finish();
}
