//! Decode benchmarks over synthesized feeds.
//!
//! Run with: `cargo bench --package tickfeed-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickfeed_bench::{FeedConfig, synthesize_feed};

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for rows in [78, 1_560, 19_500] {
        let feed = synthesize_feed(FeedConfig::intraday(rows));
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("intraday", rows), &feed, |b, feed| {
            b.iter(|| tickfeed_decode::decode(black_box(feed)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
