use criterion::{black_box, criterion_group, criterion_main, Criterion};
use logview::core_types::ContentClass;
use logview::format::format;
use logview::search::{search, SearchOptions};

fn sample_log(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            let level = match i % 7 {
                0 => "ERROR",
                1 | 2 => "WARN",
                _ => "INFO",
            };
            format!(
                "2024-01-01 10:{:02}:{:02}.123 {} worker-{} request from 10.0.{}.{} https://api.example.com/v1/items/{}\n",
                (i / 60) % 60,
                i % 60,
                level,
                i % 8,
                i % 255,
                (i * 7) % 255,
                i
            )
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let text = sample_log(5000);
    let options = SearchOptions::default();
    c.bench_function("search common term", |b| {
        b.iter(|| search(black_box(&text), black_box("worker"), &options))
    });
    c.bench_function("search rare term", |b| {
        b.iter(|| search(black_box(&text), black_box("items/4999"), &options))
    });
}

fn bench_format(c: &mut Criterion) {
    let text = sample_log(1000);
    c.bench_function("format log window", |b| {
        b.iter(|| format(black_box(&text), ContentClass::Log, 0))
    });
}

criterion_group!(benches, bench_search, bench_format);
criterion_main!(benches);
