// Benchmarks for html2markdown conversion.

use criterion::{criterion_group, criterion_main, Criterion};
use html2markdown::convert;

fn bench_simple(c: &mut Criterion) {
    let html = "<h1>Hello</h1><p>This is a <strong>simple</strong> document.</p>";
    c.bench_function("simple_document", |b| {
        b.iter(|| convert(html).unwrap());
    });
}

fn bench_nested_list(c: &mut Criterion) {
    let html = "<ul>".to_string()
        + &"<li>Item<ul><li>Nested</li></ul></li>".repeat(50)
        + "</ul>";
    c.bench_function("nested_list", |b| {
        b.iter(|| convert(&html).unwrap());
    });
}

criterion_group!(benches, bench_simple, bench_nested_list);
criterion_main!(benches);
