use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lingua_core::{Document, ExtractionRules, Lookup, Mode, Node, locate, render};

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let dictionary = read_fixture("treccani_vocabolario.html");
    let encyclopedia = read_fixture("treccani_enciclopedia.html");
    let synonyms = read_fixture("sinonimi.html");

    let mut group = c.benchmark_group("parse");

    for (name, html) in [("vocabolario", &dictionary), ("enciclopedia", &encyclopedia), ("sinonimi", &synonyms)] {
        group.bench_with_input(BenchmarkId::new("page", name), html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let html = read_fixture("treccani_vocabolario.html");
    let doc = Document::parse(&html).unwrap();
    let rules = ExtractionRules::default();

    c.bench_function("locate_dictionary", |b| {
        b.iter(|| locate(black_box(&doc), Mode::Dictionary, black_box(&rules)))
    });
}

fn bench_render(c: &mut Criterion) {
    let html = read_fixture("treccani_vocabolario.html");
    let doc = Document::parse(&html).unwrap();
    let paragraphs: Vec<Node> = doc
        .select("div[class*='term-paragraph'] p")
        .unwrap()
        .into_iter()
        .map(Node::from_element)
        .collect();

    c.bench_function("render_paragraphs", |b| {
        b.iter(|| {
            paragraphs
                .iter()
                .map(|node| render(black_box(node)).to_ansi())
                .collect::<Vec<_>>()
        })
    });
}

fn bench_full_lookup(c: &mut Criterion) {
    let dictionary = read_fixture("treccani_vocabolario.html");
    let synonyms = read_fixture("sinonimi.html");
    let lookup = Lookup::new();

    c.bench_function("full_lookup_dictionary", |b| {
        b.iter(|| lookup.parse(black_box(&dictionary), Mode::Dictionary, "casa"))
    });

    c.bench_function("full_lookup_synonyms", |b| {
        b.iter(|| lookup.parse(black_box(&synonyms), Mode::Synonym, "veloce"))
    });
}

criterion_group!(benches, bench_parse, bench_locate, bench_render, bench_full_lookup);
criterion_main!(benches);
