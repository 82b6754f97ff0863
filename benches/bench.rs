//! Criterion benchmarks for the lexibridge engine.
//!
//! Covers the hot paths of document processing:
//! - syllable estimation and morphological splitting
//! - difficulty scoring
//! - candidate word extraction
//! - exposure tracking across chunks

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexibridge::lexical::{LexicalAnalyzer, LexicalAnalyzerConfig};
use lexibridge::morphology::{estimate_syllables, score_entry, score_word, split_syllables};
use lexibridge::scaffolding::{FadingProfile, ScaffoldingContext};
use std::hint::black_box;

/// Generate paragraph-like test text for benchmarking.
fn generate_test_text(sentences: usize) -> String {
    let words = [
        "scientists",
        "hypothesized",
        "philosophy",
        "phenomenon",
        "prediction",
        "transportation",
        "incomprehensible",
        "methodology",
        "correlation",
        "structure",
        "reaction",
        "dictate",
        "inspection",
        "telegraph",
        "biology",
        "microscope",
        "unhappy",
        "scoping",
        "understanding",
        "comprehensive",
    ];

    let mut text = String::new();
    for i in 0..sentences {
        text.push_str("The ");
        for j in 0..8 {
            text.push_str(words[(i * 7 + j * 3) % words.len()]);
            text.push(' ');
        }
        text.push_str("was observed. ");
    }
    text
}

fn bench_syllables(c: &mut Criterion) {
    let words = [
        "cat",
        "react",
        "unhappy",
        "philosophy",
        "transportation",
        "incomprehensibility",
    ];

    let mut group = c.benchmark_group("syllables");
    group.throughput(Throughput::Elements(words.len() as u64));

    group.bench_function("estimate", |b| {
        b.iter(|| {
            for word in &words {
                black_box(estimate_syllables(black_box(word)));
            }
        })
    });

    group.bench_function("split", |b| {
        b.iter(|| {
            for word in &words {
                black_box(split_syllables(black_box(word)));
            }
        })
    });

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let words = [
        "cat",
        "react",
        "hypothesis",
        "transportation",
        "incomprehensibility",
    ];

    let mut group = c.benchmark_group("difficulty");
    group.throughput(Throughput::Elements(words.len() as u64));

    group.bench_function("score_word", |b| {
        b.iter(|| {
            for word in &words {
                black_box(score_word(black_box(word), None));
            }
        })
    });

    group.bench_function("score_entry", |b| {
        b.iter(|| {
            for word in &words {
                black_box(score_entry(black_box(word), &[]));
            }
        })
    });

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let text = generate_test_text(50);
    let analyzer = LexicalAnalyzer::new(LexicalAnalyzerConfig::default());

    let mut group = c.benchmark_group("extraction");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("analyzer_extract", |b| {
        b.iter(|| black_box(analyzer.extract_words(black_box(&text))))
    });

    let context = ScaffoldingContext::default();
    group.bench_function("scaffolding_extract", |b| {
        b.iter(|| black_box(context.extract_words(black_box(&text))))
    });

    group.finish();
}

fn bench_local_analysis(c: &mut Criterion) {
    let analyzer = LexicalAnalyzer::new(LexicalAnalyzerConfig::default());
    let words = [
        "predict",
        "dictation",
        "unhappy",
        "transportation",
        "methodology",
    ];

    let mut group = c.benchmark_group("local_analysis");
    group.throughput(Throughput::Elements(words.len() as u64));

    group.bench_function("analyze_word", |b| {
        b.iter(|| {
            for word in &words {
                black_box(analyzer.analyze_word_locally(black_box(word)));
            }
        })
    });

    group.finish();
}

fn bench_exposure_tracking(c: &mut Criterion) {
    let chunks: Vec<String> = (0..20).map(|_| generate_test_text(5)).collect();

    let mut group = c.benchmark_group("scaffolding");
    group.throughput(Throughput::Elements(chunks.len() as u64));

    group.bench_function("update_exposure", |b| {
        b.iter(|| {
            let mut context = ScaffoldingContext::new(FadingProfile::Adaptive);
            for chunk in &chunks {
                context.update_exposure(black_box(chunk));
            }
            black_box(context.format_exclusion_prompt())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_syllables,
    bench_scoring,
    bench_extraction,
    bench_local_analysis,
    bench_exposure_tracking
);
criterion_main!(benches);
