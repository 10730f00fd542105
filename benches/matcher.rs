//! Performance benchmarks for the streaming matcher.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pagewatch::{query_html, Selector};

fn synthetic_page(rows: usize) -> String {
    let mut html = String::from("<html><body><div class='page'><ul>");
    for index in 0..rows {
        html.push_str(&format!("<li class='row'>item {index}</li>"));
    }
    html.push_str("<li id='needle'>needle</li></ul></div></body></html>");
    html
}

fn bench_selector_match(c: &mut Criterion) {
    let html = synthetic_page(1000);

    let mut group = c.benchmark_group("matcher");
    group.throughput(Throughput::Bytes(html.len() as u64));

    let needle = Selector::parse("div #needle");
    group.bench_function("id_behind_1000_rows", |b| {
        b.iter(|| query_html(black_box(&html), &needle, None));
    });

    let first = Selector::parse("li");
    group.bench_function("first_row", |b| {
        b.iter(|| query_html(black_box(&html), &first, None));
    });

    group.finish();
}

criterion_group!(benches, bench_selector_match);
criterion_main!(benches);
