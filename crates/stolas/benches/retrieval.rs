//! Benchmarks for lexical retrieval.
//!
//! The retriever scans the whole corpus per query, so these track how query
//! latency grows with corpus size.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stolas::scorer::{Scorer, TermOverlapScorer};
use stolas::seed::seed_store;
use stolas::{InMemoryStore, PassageStore, RetrievalConfig, Retriever};

const VOCAB: &[&str] = &[
    "account", "billing", "invoice", "password", "reset", "refund", "policy", "support",
    "contact", "enterprise", "sso", "saml", "oauth2", "login", "page", "plan", "team",
    "chat", "products", "services",
];

fn synthetic_store(passages: usize) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    let entries = (0..passages)
        .map(|i| {
            let text = (0..24)
                .map(|j| VOCAB[(i * 7 + j * 3) % VOCAB.len()])
                .collect::<Vec<_>>()
                .join(" ");
            (text, format!("doc_{i}"))
        })
        .collect();
    store.extend(entries).unwrap();
    store
}

// ============================================================================
// SCORING BENCHMARKS
// ============================================================================

fn scoring_benchmark(c: &mut Criterion) {
    let scorer = TermOverlapScorer::new();
    let text = "Q: How to reset my password?\nA: You can reset your password via the \
                'Forgot Password' link on the login page.";

    let mut group = c.benchmark_group("scoring");

    group.bench_function("term_overlap_short_query", |b| {
        b.iter(|| scorer.score(black_box("reset password"), black_box(text)))
    });

    group.bench_function("term_overlap_long_query", |b| {
        b.iter(|| {
            scorer.score(
                black_box("how can I reset the password for my enterprise login page"),
                black_box(text),
            )
        })
    });

    group.finish();
}

// ============================================================================
// RETRIEVAL BENCHMARKS
// ============================================================================

fn retrieval_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieval");

    let seeded = Arc::new(InMemoryStore::new());
    seed_store(seeded.as_ref()).unwrap();
    let retriever = Retriever::new(seeded, RetrievalConfig::default());
    group.bench_function("seed_corpus_top_3", |b| {
        b.iter(|| retriever.retrieve(black_box("What is the refund policy?"), 3))
    });

    for size in [100, 1_000, 10_000] {
        let retriever = Retriever::new(synthetic_store(size), RetrievalConfig::default());
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &retriever, |b, r| {
            b.iter(|| r.retrieve(black_box("reset billing password"), 5))
        });
    }

    group.finish();
}

criterion_group!(benches, scoring_benchmark, retrieval_benchmark);
criterion_main!(benches);
