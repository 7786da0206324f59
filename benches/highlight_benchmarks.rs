//! Benchmarks for classification and rendering.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glimpse_syntax::{Highlighter, escape_html};

/// Generates a JavaScript-ish source file with comments, strings and numbers.
fn generate_source(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 4 {
            0 => format!("const value{i} = {i}.5; // counter {i}\n"),
            1 => format!("let label{i} = \"return if else {i}\";\n"),
            2 => "/* block comment with class and function */\n".to_string(),
            _ => format!("function f{i}() {{ return value{i} * 2; }}\n"),
        })
        .collect()
}

/// Benchmarks escaping alone.
fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");

    for size in [100, 1000, 10000].iter() {
        let text = generate_source(*size);
        group.bench_with_input(BenchmarkId::new("escape_html", size), &text, |b, text| {
            b.iter(|| black_box(escape_html(black_box(text))))
        });
    }

    group.finish();
}

/// Benchmarks classification (matching plus overlap resolution).
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let highlighter = Highlighter::new().unwrap();

    for size in [100, 1000, 10000].iter() {
        let text = generate_source(*size);
        group.bench_with_input(BenchmarkId::new("js", size), &text, |b, text| {
            b.iter(|| black_box(highlighter.classify(black_box(text), "js")))
        });
    }

    group.finish();
}

/// Benchmarks the full highlight path, including rendering.
fn bench_highlight(c: &mut Criterion) {
    let highlighter = Highlighter::new().unwrap();
    let text = generate_source(1000);

    c.bench_function("highlight_1000_lines", |b| {
        b.iter(|| black_box(highlighter.highlight(black_box(&text), "app.js")))
    });

    c.bench_function("passthrough_1000_lines", |b| {
        b.iter(|| black_box(highlighter.highlight(black_box(&text), "notes.txt")))
    });
}

criterion_group!(benches, bench_escape, bench_classify, bench_highlight);
criterion_main!(benches);
