//! Benchmarks for content model import, normalization and export.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic HTML documents of growing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use content_model::dom::{parse_fragment, Dom};
use content_model::{
    content_model_to_dom, dom_to_content_model, normalize_document, DomToModelOptions,
    ModelToDomOptions,
};

/// Creates an HTML fragment with the given number of paragraphs and a
/// table every ten paragraphs.
fn create_test_html(paragraph_count: usize) -> String {
    let mut html = String::new();
    for i in 0..paragraph_count {
        html.push_str(&format!(
            "<p>  Paragraph {} with <b>bold</b> and <i>italic </i> text.  </p>",
            i + 1
        ));
        if i % 10 == 9 {
            html.push_str("<table><tr><td colspan=\"2\">a</td></tr><tr><td>b</td><td></td></tr></table>");
        }
    }
    html
}

fn parse(html: &str) -> (Dom, content_model::NodeId) {
    let mut dom = Dom::new();
    let root = dom.create_element("div");
    parse_fragment(&mut dom, root, html).unwrap();
    (dom, root)
}

/// Benchmark DOM to model import at various sizes.
fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    for count in [10, 100, 1000].iter() {
        let (dom, root) = parse(&create_test_html(*count));
        let options = DomToModelOptions::default();

        group.bench_function(format!("{}_paragraphs", count), |b| {
            b.iter(|| dom_to_content_model(black_box(&dom), root, &options, None));
        });
    }

    group.finish();
}

/// Benchmark normalization of an already imported model.
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for count in [10, 100, 1000].iter() {
        let (dom, root) = parse(&create_test_html(*count));
        let model = dom_to_content_model(&dom, root, &DomToModelOptions::default(), None);

        group.bench_function(format!("{}_paragraphs", count), |b| {
            b.iter(|| {
                let mut model = model.clone();
                normalize_document(black_box(&mut model));
                model
            });
        });
    }

    group.finish();
}

/// Benchmark model to DOM export.
fn bench_export(c: &mut Criterion) {
    let (dom, root) = parse(&create_test_html(100));
    let model = dom_to_content_model(&dom, root, &DomToModelOptions::default(), None);
    let options = ModelToDomOptions::default();

    c.bench_function("export_100_paragraphs", |b| {
        b.iter(|| {
            let mut model = model.clone();
            let mut dom = Dom::new();
            let root = dom.create_element("div");
            content_model_to_dom(&mut dom, root, black_box(&mut model), &options)
        });
    });
}

criterion_group!(benches, bench_import, bench_normalize, bench_export);
criterion_main!(benches);
