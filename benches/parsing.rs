//! Criterion benchmarks for parsing, encoding, expansion and normalization.

use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use uri_components::{ComponentType, Uri, UriComponentsBuilder, encode, remove_dot_segments};

/// Benchmark: UriComponentsBuilder::from_uri_string with varying URI shapes
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("minimal", "http://a.co"),
        ("typical", "https://example.com/hotels/42/rooms"),
        (
            "deep_path",
            "https://example.com/level1/level2/level3/level4/level5/level6",
        ),
        ("with_query", "https://example.com/search?q=rust&page=2&sort=asc"),
        (
            "full",
            "https://user:pw@example.com:8443/a/b?q=rust&page=2#results",
        ),
        ("ipv6", "http://[1abc:2abc:3abc::5ABC:6abc]:8080/hotel%20list"),
        ("template", "https://{host}:{port}/hotels/{hotel}?date={date}"),
    ];

    for (name, uri) in test_cases {
        group.throughput(Throughput::Bytes(uri.len() as u64));
        group.bench_with_input(BenchmarkId::new("builder", name), &uri, |b, uri| {
            b.iter(|| UriComponentsBuilder::from_uri_string(black_box(uri)));
        });
        if !uri.contains('{') {
            group.bench_with_input(BenchmarkId::new("uri", name), &uri, |b, uri| {
                b.iter(|| Uri::parse(black_box(uri)));
            });
        }
    }

    group.finish();
}

/// Benchmark: percent-encoding text of varying composition
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let test_cases = [
        ("ascii_clean", "hotels/grand-budapest/rooms/42"),
        ("spaces", "hotel list/with some spaces/in it"),
        ("non_ascii", "Z\u{fc}rich/M\u{fc}nchen/S\u{e3}o Paulo"),
    ];

    for (name, text) in test_cases {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("path", name), &text, |b, text| {
            b.iter(|| encode(black_box(text), ComponentType::Path));
        });
    }

    let components = UriComponentsBuilder::from_uri_string(
        "http://example.com/hotel list/Z\u{fc}rich?q=a b&page=2#top of page",
    )
    .expect("valid test URI")
    .build()
    .expect("buildable test URI");
    group.bench_function("components", |b| {
        b.iter(|| black_box(&components).encode());
    });

    group.finish();
}

/// Benchmark: template expansion with positional and named values
fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    let components = UriComponentsBuilder::from_uri_string(
        "https://example.com:{port}/hotels/{hotel}/rooms/{room:[0-9]+}?date={date}",
    )
    .expect("valid test URI")
    .build()
    .expect("buildable test URI");

    let positional = ["8443", "42", "101", "2026-10-19"];
    group.bench_function("positional", |b| {
        b.iter(|| black_box(&components).expand(black_box(&positional)));
    });

    let named = HashMap::from([
        ("port", "8443"),
        ("hotel", "42"),
        ("room", "101"),
        ("date", "2026-10-19"),
    ]);
    group.bench_function("named", |b| {
        b.iter(|| black_box(&components).expand_with(black_box(&named)));
    });

    group.finish();
}

/// Benchmark: dot-segment removal at varying depths
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let depths = [1, 2, 4, 8, 16];

    for depth in depths {
        let path: String = (0..depth)
            .map(|i| match i % 4 {
                0 => "/alpha",
                1 => "/./beta",
                2 => "/gamma/..",
                _ => "/delta",
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("depth", depth), &path, |b, path| {
            b.iter(|| remove_dot_segments(black_box(path)));
        });
    }

    group.finish();
}

/// Benchmark: building from individual components
fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    group.bench_function("components", |b| {
        b.iter(|| {
            UriComponentsBuilder::new()
                .scheme(black_box("https"))
                .host(black_box("example.com"))
                .port(black_box(8443))
                .path(black_box("/hotels"))
                .path_segment(black_box(["42", "rooms"]))
                .query_param("date", black_box(["2026-10-19"]))
                .build()
        });
    });

    group.bench_function("to_uri_string", |b| {
        b.iter(|| {
            UriComponentsBuilder::from_path(black_box("/hotel list"))
                .query_param("q", ["a b"])
                .to_uri_string()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_encode,
    bench_expand,
    bench_normalize,
    bench_builder,
);
criterion_main!(benches);
