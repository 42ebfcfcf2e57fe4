//! # Moodtune Performance Benchmarks
//!
//! Benchmarks for the per-request hot path: genre filtering, seeded sampling
//! and response parsing.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench recommend
//! cargo bench emotion
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use moodtune::dataset::Dataset;
use moodtune::emotion::{dominant_emotion, parse_scores};
use moodtune::genre::GenreMap;
use moodtune::recommend::{matching_rows, RecommendationSelector};
use std::hint::black_box;

const GENRES: &[&str] = &[
    "pop", "dance pop", "electropop", "rock", "hard rock", "metal", "rap", "trap",
    "r&b", "neo soul", "lofi", "classical", "jazz", "indie folk", "edm", "latin",
];

/// Helper function to create a synthetic dataset with realistic genre spread
fn create_benchmark_dataset(rows: usize) -> Dataset {
    let rows: Vec<Vec<String>> = (0..rows)
        .map(|i| {
            vec![
                format!("Song {i:05}"),
                format!("Artist {}", i / 25),
                format!("Album {}", i / 10),
                GENRES[i % GENRES.len()].to_string(),
                format!("https://youtu.be/{i:08x}"),
            ]
        })
        .collect();

    Dataset::from_rows(
        ["track_name", "track_artist", "track_album_name", "playlist_genre", "youtube_link"],
        rows,
    )
    .expect("benchmark dataset has a genre column")
}

/// Benchmark genre filtering over growing datasets
fn benchmark_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_filter");
    let map = GenreMap::default();
    let genres = map.genres_for("joy");

    for size in [1_000, 10_000, 30_000].iter() {
        let dataset = create_benchmark_dataset(*size);
        group.bench_with_input(BenchmarkId::new("matching_rows", size), &dataset, |b, ds| {
            b.iter(|| matching_rows(black_box(ds), black_box(&genres)))
        });
    }

    group.finish();
}

/// Benchmark full recommendation (filter, sample, project)
fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_full");
    let selector = RecommendationSelector::default();
    let dataset = create_benchmark_dataset(30_000);

    for emotion in ["joy", "anger", "love", "unknown"].iter() {
        group.bench_with_input(BenchmarkId::new("recommend_10", emotion), emotion, |b, emotion| {
            b.iter(|| selector.recommend(black_box(&dataset), black_box(emotion), 10))
        });
    }

    group.finish();
}

/// Benchmark response parsing and reduction
fn benchmark_emotion_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("emotion_parse");
    let body = serde_json::json!([[
        {"label": "no_emotion", "score": 0.05},
        {"label": "joy", "score": 0.61},
        {"label": "sadness", "score": 0.12},
        {"label": "surprise", "score": 0.08},
        {"label": "fear", "score": 0.07},
        {"label": "anger", "score": 0.07}
    ]]);

    group.bench_function("parse_and_reduce", |b| {
        b.iter(|| {
            let scores = parse_scores(black_box(&body)).unwrap_or_default();
            dominant_emotion(&scores).map(|s| s.label.clone())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_filtering,
    benchmark_recommend,
    benchmark_emotion_parsing
);
criterion_main!(benches);
