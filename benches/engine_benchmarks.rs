//! Performance benchmarks for the type engine.
//!
//! - Parsing: short names up to deeply nested argument lists
//! - Substitution maps: cold builds versus cache hits
//! - Assignability: covariant, contravariant and invariant checks
//! - Queries: component and key extraction through inherited capabilities
//!
//! Run with the `profile-with-puffin` feature to turn on profiling scopes:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- "substitution"
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use genus::{FormatMode, TypeEngine, TypeNode, TypeRegistry, TypeResolver, format, parse};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

const SIMPLE: &str = "java.lang.String";
const NESTED: &str = "java.util.Map<java.lang.String, java.util.List<? extends java.lang.Number>>";
const WIDE: &str = "java.util.Map<java.util.Map<java.lang.String, java.lang.Integer>, \
                    java.util.Map<? super java.lang.Long, java.util.List<java.lang.Double[]>[]>>";

fn deep(levels: usize) -> String {
    let mut text = String::from("java.lang.String");
    for _ in 0..levels {
        text = format!("java.util.List<{text}>");
    }
    text
}

/// Parse and format throughput across expression shapes
fn parser_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    let deep_text = deep(32);

    for (name, text) in [
        ("simple", SIMPLE),
        ("nested", NESTED),
        ("wide", WIDE),
        ("deep_32", deep_text.as_str()),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| parse(black_box(text)).map(|node| node.type_arg_count()))
        });
    }

    let node = parse(WIDE).unwrap();
    group.bench_function("format_wide", |b| {
        b.iter(|| format(black_box(&node), FormatMode::Qualified).len())
    });

    group.finish();
}

/// Cold substitution map builds versus cached lookups
fn substitution_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitution");
    setup_profiler();

    let registry = TypeRegistry::with_java_prelude();
    let context = parse("java.util.LinkedHashMap<java.lang.String, java.lang.Integer>").unwrap();

    group.bench_function("build_uncached", |b| {
        let resolver = TypeResolver::new(&registry);
        b.iter(|| {
            let map = resolver.build_substitution_map(black_box(&context));
            end_profiling_frame();
            map.map(|m| m.len())
        })
    });

    let engine = TypeEngine::with_java_prelude();
    group.bench_function("engine_cached", |b| {
        b.iter(|| engine.substitution_map(black_box(&context)).map(|m| m.len()))
    });

    group.finish();
}

/// Assignability under the different variance rules
fn assignability_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignability");
    let engine = TypeEngine::with_java_prelude();

    let cases = [
        (
            "covariant",
            "java.util.Map<? extends java.lang.Number, ? extends java.lang.CharSequence>",
            "java.util.HashMap<java.lang.Integer, java.lang.String>",
        ),
        (
            "contravariant",
            "java.util.Collection<? super java.lang.Integer>",
            "java.util.ArrayList<java.lang.Number>",
        ),
        (
            "invariant_reject",
            "java.util.List<java.lang.Number>",
            "java.util.List<java.lang.Integer>",
        ),
        ("arrays", "java.lang.Object[]", "java.lang.String[][]"),
    ];

    for (name, target, candidate) in cases {
        let target: TypeNode = engine.parse(target).unwrap();
        let candidate: TypeNode = engine.parse(candidate).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| engine.is_assignable_from(black_box(&target), black_box(&candidate)))
        });
    }

    group.finish();
}

/// Component and key extraction
fn query_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let engine = TypeEngine::with_java_prelude();

    let list = engine
        .parse("java.util.LinkedList<java.lang.String>")
        .unwrap();
    let map = engine
        .parse("java.util.TreeMap<java.lang.Long, java.lang.Double>")
        .unwrap();

    group.bench_function("component_list", |b| {
        b.iter(|| engine.component_type(black_box(&list)))
    });
    group.bench_function("key_map", |b| b.iter(|| engine.key_type(black_box(&map))));

    group.finish();
}

criterion_group!(
    benches,
    parser_benchmarks,
    substitution_benchmarks,
    assignability_benchmarks,
    query_benchmarks
);
criterion_main!(benches);
