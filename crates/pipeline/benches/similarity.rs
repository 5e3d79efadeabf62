//! Benchmarks for content similarity
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic corpus so the bench needs no data files.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::similarity::{OverlapIndex, TfIdfIndex};
use pipeline::{ContentSimilarity, EventProfile, Language};

const TAGS: &[&str] = &[
    "music", "jazz", "rock", "food", "wine", "hiking", "chess", "poetry", "painting", "coding",
    "startup", "yoga", "running", "cinema", "theatre", "photography",
];

fn synthetic_profiles(count: usize) -> Vec<EventProfile> {
    (0..count)
        .map(|i| EventProfile {
            event_id: format!("e{i}"),
            creator_id: format!("c{}", i % 97),
            features: vec![
                TAGS[i % TAGS.len()].to_string(),
                TAGS[(i * 7 + 3) % TAGS.len()].to_string(),
                format!("event number {}", i % 50),
            ],
        })
        .collect()
}

fn interests() -> Vec<String> {
    vec!["jazz".to_string(), "food".to_string(), "cinema".to_string()]
}

fn bench_tfidf_fit(c: &mut Criterion) {
    let documents: Vec<String> = synthetic_profiles(5_000)
        .iter()
        .map(EventProfile::document)
        .collect();

    c.bench_function("tfidf_fit_5000", |b| {
        b.iter(|| {
            let index = TfIdfIndex::fit_or_fallback(black_box(&documents), &[Language::English]);
            black_box(index)
        })
    });
}

fn bench_tfidf_scores(c: &mut Criterion) {
    let documents: Vec<String> = synthetic_profiles(5_000)
        .iter()
        .map(EventProfile::document)
        .collect();
    let index = TfIdfIndex::fit_or_fallback(&documents, &[Language::English]);
    let interests = interests();

    c.bench_function("tfidf_scores_5000", |b| {
        b.iter(|| black_box(index.scores(black_box(&interests))))
    });
}

fn bench_overlap_scores(c: &mut Criterion) {
    let profiles = synthetic_profiles(5_000);
    let index = OverlapIndex::fit(profiles.iter().map(|p| p.features.as_slice()));
    let interests = interests();

    c.bench_function("overlap_scores_5000", |b| {
        b.iter(|| black_box(index.scores(black_box(&interests))))
    });
}

criterion_group!(
    benches,
    bench_tfidf_fit,
    bench_tfidf_scores,
    bench_overlap_scores
);
criterion_main!(benches);
