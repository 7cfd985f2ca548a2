//! Benchmarks for the transcription pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ptbr_g2p::{transcribe, Algorithm};

fn benchmark_short_word(c: &mut Criterion) {
    c.bench_function("short_word_silva", |b| {
        b.iter(|| transcribe(black_box("casa"), Algorithm::Silva))
    });
}

fn benchmark_long_word(c: &mut Criterion) {
    c.bench_function("long_word_silva", |b| {
        b.iter(|| transcribe(black_box("paralelepípedo"), Algorithm::Silva))
    });
}

fn benchmark_ceci(c: &mut Criterion) {
    c.bench_function("long_word_ceci", |b| {
        b.iter(|| transcribe(black_box("paralelepípedo"), Algorithm::Ceci))
    });
}

fn benchmark_word_list(c: &mut Criterion) {
    let words = [
        "chocolate",
        "porque",
        "muito",
        "arroz",
        "telefone",
        "constante",
        "psicologia",
    ];
    c.bench_function("word_list_silva", |b| {
        b.iter(|| {
            for word in words {
                let _ = transcribe(black_box(word), Algorithm::Silva);
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_short_word,
    benchmark_long_word,
    benchmark_ceci,
    benchmark_word_list
);
criterion_main!(benches);
