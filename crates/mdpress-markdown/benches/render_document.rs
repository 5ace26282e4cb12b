//! Benchmarks for whole-document conversion.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mdpress_markdown::{markdown_to_html_node, text_to_textnodes};

/// Generate a document with `sections` headings, each followed by a
/// paragraph, a list and a code block.
fn generate_markdown(sections: usize) -> String {
    let mut md = String::with_capacity(sections * 256);
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str(&format!(
            "Paragraph {i} with **bold**, _italic_, `code` and a [link](/page-{i}).\n\n"
        ));
        md.push_str("- first item\n- second ![img](/img.png)\n\n");
        md.push_str("```\nlet x = 1;\n```\n\n");
    }
    md
}

fn bench_inline(c: &mut Criterion) {
    let text = "This is **text** with an _italic_ word and a `code block` and an ![image](https://example.com/a.png) and a [link](https://example.com)";

    c.bench_function("text_to_textnodes", |b| {
        b.iter(|| text_to_textnodes(text));
    });
}

fn bench_document_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_document");

    for sections in [1, 10, 100] {
        let markdown = generate_markdown(sections);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &markdown,
            |b, md| {
                b.iter(|| markdown_to_html_node(md).map(|root| root.render()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_inline, bench_document_sizes);
criterion_main!(benches);
