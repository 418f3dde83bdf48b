//! Query engine throughput benchmarks
//!
//! Measures the three ways a caller can run a path:
//! - compile only, and evaluate a precompiled plan
//! - one-shot `query` (compile + evaluate per call) vs. a shared `PathCache`
//! - fan-out of many evaluations over a worker pool (1, 2, 4, 8 threads)
//!
//! Run benchmarks: `cargo bench --bench query_throughput`
//!
//! Compare specific groups:
//! ```
//! cargo bench --bench query_throughput -- "facade"
//! cargo bench --bench query_throughput -- "fan_out"
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use jsonpick::executor::{Executor, ExecutorImpl};
use jsonpick::{PathCache, Value, compile, evaluate, query};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;

const PATHS: [(&str, &str); 4] = [
    ("dotted", "10.errors.113.description"),
    ("bracketed", "[10].errors.[113].description"),
    ("wildcard", "10.errors[*].code"),
    ("descent", "..description"),
];

/// A report shaped like the lookup the paths target: record "10" with 500 errors.
fn generate_report() -> Value {
    let records: serde_json::Map<String, serde_json::Value> = (0..20)
        .map(|r| {
            let errors: Vec<serde_json::Value> = (0..500)
                .map(|i| json!({ "code": i, "description": format!("record {} error {}", r, i) }))
                .collect();
            (r.to_string(), json!({ "errors": errors }))
        })
        .collect();
    Value::from(serde_json::Value::Object(records))
}

fn benchmark_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (name, path) in PATHS {
        group.bench_with_input(BenchmarkId::from_parameter(name), path, |b, p| {
            b.iter(|| compile(black_box(p)))
        });
    }
    group.finish();
}

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let document = generate_report();
    for (name, path) in PATHS {
        let plan = compile(path).expect("benchmark path compiles");
        group.bench_with_input(BenchmarkId::from_parameter(name), &plan, |b, plan| {
            b.iter(|| evaluate(plan, black_box(&document)).len())
        });
    }
    group.finish();
}

fn benchmark_facade(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade");
    let document = generate_report();
    let cache = PathCache::new();
    for (name, path) in PATHS {
        group.bench_with_input(BenchmarkId::new("one_shot", name), path, |b, p| {
            b.iter(|| query(&document, black_box(p)).map(|m| m.len()))
        });
        group.bench_with_input(BenchmarkId::new("cached", name), path, |b, p| {
            b.iter(|| cache.query(&document, black_box(p)).map(|m| m.len()))
        });
    }
    group.finish();
}

/// The harness's defining workload: many evaluations of one plan against one
/// shared document, fanned out over a pool.
fn benchmark_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    let document = Arc::new(generate_report());
    let plan = Arc::new(compile("10.errors.113.description").expect("benchmark path compiles"));
    let tasks = 1000;
    group.throughput(Throughput::Elements(tasks as u64));

    for threads in [1, 2, 4, 8] {
        let executor = ExecutorImpl::with_threads(threads).expect("failed to build executor");
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, _| {
            b.iter(|| {
                let d = Arc::clone(&document);
                let p = Arc::clone(&plan);
                executor.execute_all((0..tasks).collect::<Vec<usize>>(), move |_| {
                    evaluate(&p, &d).len()
                })
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_compile,
    benchmark_evaluate,
    benchmark_facade,
    benchmark_fan_out
);
criterion_main!(benches);
