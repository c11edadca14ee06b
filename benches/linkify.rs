//! Performance benchmarks for ferrolink
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ferrolink::{Options, PasteMethod, Session};

/// Sample pasted content of various shapes
mod samples {
    pub const TINY: &str = "Visit http://x.io, thanks";

    pub const MIXED: &str = "Release notes are at https://example.com/releases/1.2?lang=en#changes \
and the mirror at 192.168.10.20:8080/files. Questions go to support@example.com or \
ops-team@mail.example.org; the status page is status.example.io.\n";

    /// Prose without a single link; the scanner should pass it through.
    pub fn plain(repeat: usize) -> String {
        "The quick brown fox jumps over the lazy dog, again and again. ".repeat(repeat)
    }

    pub fn mixed(repeat: usize) -> String {
        MIXED.repeat(repeat)
    }

    /// Dots and at-signs everywhere, none of them forming a valid link
    pub fn pathological(repeat: usize) -> String {
        "a.b.c.d.e.f@g.h-i.j.k.l.m.n.o.p.1 ".repeat(repeat)
    }
}

fn bench_paste(c: &mut Criterion) {
    let mut group = c.benchmark_group("paste");

    group.throughput(Throughput::Bytes(samples::TINY.len() as u64));
    group.bench_function("tiny", |b| b.iter(|| ferrolink::linkify(black_box(samples::TINY))));

    for repeat in [10, 100, 1000] {
        let plain = samples::plain(repeat);
        group.throughput(Throughput::Bytes(plain.len() as u64));
        group.bench_with_input(BenchmarkId::new("plain", plain.len()), &plain, |b, input| {
            b.iter(|| ferrolink::paste::normalize(black_box(input)).len())
        });

        let mixed = samples::mixed(repeat);
        group.throughput(Throughput::Bytes(mixed.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", mixed.len()), &mixed, |b, input| {
            b.iter(|| ferrolink::paste::normalize(black_box(input)).len())
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let words = [
        "hello",
        "example.com",
        "https://example.com/a/b/c?x=1&y=2#frag",
        "first.last@mail.example.org",
        "192.168.0.1:8080",
    ];
    for word in words {
        group.bench_with_input(BenchmarkId::from_parameter(word), word, |b, w| {
            b.iter(|| ferrolink::classify(black_box(w)))
        });
    }
    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    let text = samples::mixed(5);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("session_type_str", |b| {
        b.iter(|| {
            let mut session = Session::new(Options::default());
            session.type_str(black_box(&text)).map(|links| links.len())
        })
    });
    group.bench_function("session_paste", |b| {
        b.iter(|| {
            let mut session = Session::new(Options::default());
            session.paste(PasteMethod::Paste, black_box(&text)).map(|html| html.len())
        })
    });
    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let input = samples::pathological(2000);
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("dotted_noise", |b| {
        b.iter(|| ferrolink::paste::normalize(black_box(&input)).len())
    });

    group.finish();
}

criterion_group!(benches, bench_paste, bench_classify, bench_typing, bench_pathological);
criterion_main!(benches);
