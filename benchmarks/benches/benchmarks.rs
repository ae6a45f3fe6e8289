use criterion::measurement::WallTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkGroup, Criterion};
use jsonreach::strategy::{dynamic_unmarshal, library_path, typed_unmarshal};
use jsonreach::{FIXTURE, FIXTURE_COMPACT};

fn serde_json_value_parse(json: &str) -> serde_json::Value {
    serde_json::from_str(json).unwrap()
}

fn bench_with_input(mut group: BenchmarkGroup<'_, WallTime>, input: &str) {
    group.bench_function("library-path", |b| {
        b.iter(|| library_path(black_box(input)).unwrap());
    });

    group.bench_function("dynamic-unmarshal", |b| {
        b.iter(|| dynamic_unmarshal(black_box(input)).unwrap());
    });

    group.bench_function("typed-unmarshal", |b| {
        b.iter(|| typed_unmarshal(black_box(input)).unwrap());
    });

    // Parsing alone, without reaching into the result.
    group.bench_function("serde-json/value", |b| {
        b.iter(|| serde_json_value_parse(black_box(input)));
    });
}

fn benchmarks(c: &mut Criterion) {
    bench_with_input(c.benchmark_group("pretty"), FIXTURE);
    bench_with_input(c.benchmark_group("compact"), FIXTURE_COMPACT);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
