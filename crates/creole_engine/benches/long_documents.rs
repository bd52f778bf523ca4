use criterion::{criterion_group, criterion_main, Criterion};

use creole_engine::{formats, translate, ProcessOptions, Rendered};

/// A synthetic document exercising every construct the engine knows.
fn build_document(sections: usize) -> String {
    let mut doc = String::new();
    for i in 0..sections {
        doc.push_str(&format!("== Section {i} ==\n"));
        doc.push_str("A paragraph with **bold**, //italic//, __underline__, ");
        doc.push_str("##monospace##, a [[http://example.org/|link]], and an ");
        doc.push_str("escape: ~*.\n\n");
        doc.push_str("*first\n*second\n**nested\n*third\n\n");
        doc.push_str(";term:with a definition\n\n");
        doc.push_str("|=h1|=h2\n|a|b\n|c|d\n\n");
        doc.push_str("{{{\npreformatted line\n\tindented\n}}}\n\n----\n\n");
    }
    doc
}

fn render(doc: &str, format: &creole_engine::OutputFormat, arena: &mut Vec<u8>) -> Rendered {
    translate(
        doc.as_bytes(),
        arena,
        ProcessOptions::empty(),
        "\n",
        format,
        0,
    )
    .expect("arena sized for the document")
}

fn long_documents(c: &mut Criterion) {
    let doc = build_document(200);
    let mut arena = vec![0u8; doc.len() * 8];
    let mut group = c.benchmark_group("long documents");
    group.bench_function("html", |b| {
        b.iter(|| render(&doc, &formats::HTML, &mut arena))
    });
    group.bench_function("creole roundtrip", |b| {
        b.iter(|| render(&doc, &formats::CREOLE, &mut arena))
    });
    group.bench_function("plain text", |b| {
        b.iter(|| render(&doc, &formats::TEXT, &mut arena))
    });
    group.bench_function("null sink", |b| {
        b.iter(|| render(&doc, &formats::NULL_SINK, &mut arena))
    });
    group.finish();
}

fn short_inlines(c: &mut Criterion) {
    let content = "some **text with //nested styles//**, a {{img.png|picture}}, \
                   ##code##, ^^sup^^ and ,,sub,, plus [[Page|a link]].";
    let mut arena = vec![0u8; content.len() * 8];
    let mut group = c.benchmark_group("inlines");
    group.bench_function("html", |b| {
        b.iter(|| render(content, &formats::HTML, &mut arena))
    });
    group.finish();
}

criterion_group!(benches, long_documents, short_inlines);
criterion_main!(benches);
