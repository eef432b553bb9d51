//! Criterion benchmarks for the search engine.
//!
//! Compares the sequential and fan-out scoring paths over synthetic corpora
//! of increasing size, plus browse ordering and windowing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use hadith::corpus::Hadith;
use hadith::search::{
    Addressing, browse, paginate, parallel_search_with_workers, sequential_search,
};

const BOOKS: [&str; 5] = ["abu-daud", "bukhari", "ibnu-majah", "muslim", "tirmidzi"];

fn synthetic_corpus(size: usize) -> Vec<Hadith> {
    (0..size)
        .map(|i| Hadith {
            book: BOOKS[i % BOOKS.len()].to_string(),
            number: i64::try_from(i).unwrap_or(i64::MAX),
            primary_text: format!("narration {i} about the sun and the moon and prayer"),
            translated_text: if i % 7 == 0 {
                format!("riwayat {i} tentang matahari terbit")
            } else {
                format!("riwayat {i} tentang bulan dan shalat")
            },
        })
        .collect()
}

// =============================================================================
// Scoring
// =============================================================================

fn scoring_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [1_000usize, 10_000, 50_000] {
        let records = synthetic_corpus(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &records, |b, records| {
            b.iter(|| sequential_search(black_box(records), black_box("matahari"), 0));
        });

        let workers = rayon::current_num_threads();
        group.bench_with_input(BenchmarkId::new("fan_out", size), &records, |b, records| {
            b.iter(|| {
                parallel_search_with_workers(black_box(records), black_box("matahari"), 0, workers)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Browse and windowing
// =============================================================================

fn browse_benchmarks(c: &mut Criterion) {
    let records = synthetic_corpus(20_000);
    let mut group = c.benchmark_group("browse");

    group.bench_function("browse_20k", |b| b.iter(|| browse(black_box(&records))));

    let hits = browse(&records);
    group.bench_function("page_window", |b| {
        b.iter(|| paginate(black_box(&hits), Addressing::Page { page: 40, page_size: 50 }).items.len());
    });

    group.finish();
}

criterion_group!(benches, scoring_benchmarks, browse_benchmarks);
criterion_main!(benches);
