//! Weighted substring scoring over a flattened record slice.
//!
//! ## Scoring
//!
//! The trimmed, lowercased query is tested for containment in three
//! projections of each record, and every hit adds a fixed weight:
//!
//! | field           | weight |
//! |-----------------|--------|
//! | translated text | 3      |
//! | primary text    | 2      |
//! | book name       | 1      |
//!
//! Records scoring 0 are dropped. Hits are ordered by score (descending),
//! then book name, then record number, and only then truncated to `limit`.
//!
//! ## Parallel path
//!
//! At [`PARALLEL_THRESHOLD`] records and above, the slice is split into
//! contiguous chunks scored on the rayon pool. Each chunk returns its own
//! hit list; the lists are concatenated and pass through the same global
//! sort, so both paths return identical sequences.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::Hadith;

/// Below this many records the sequential path is always used.
pub const PARALLEL_THRESHOLD: usize = 1000;

pub const TRANSLATED_WEIGHT: u32 = 3;
pub const PRIMARY_WEIGHT: u32 = 2;
pub const BOOK_WEIGHT: u32 = 1;

/// A record paired with its relevance score.
///
/// A score of 0 marks browse ordering, where no scoring was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub hadith: Hadith,
    pub score: u32,
}

/// Score one record against an already trimmed and lowercased query.
#[must_use]
pub fn score_record(hadith: &Hadith, needle: &str) -> u32 {
    let mut score = 0;
    if hadith.translated_text.to_lowercase().contains(needle) {
        score += TRANSLATED_WEIGHT;
    }
    if hadith.primary_text.to_lowercase().contains(needle) {
        score += PRIMARY_WEIGHT;
    }
    if hadith.book.to_lowercase().contains(needle) {
        score += BOOK_WEIGHT;
    }
    score
}

/// Result ordering: score descending, then book, then number.
#[must_use]
pub fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.hadith.book.cmp(&b.hadith.book))
        .then_with(|| a.hadith.number.cmp(&b.hadith.number))
}

/// Search `records`, choosing the parallel path for large inputs.
///
/// `limit == 0` returns every hit.
#[must_use]
pub fn search(records: &[Hadith], query: &str, limit: usize) -> Vec<SearchHit> {
    parallel_search(records, query, limit)
}

/// Single-threaded search.
#[must_use]
pub fn sequential_search(records: &[Hadith], query: &str, limit: usize) -> Vec<SearchHit> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    finish(score_chunk(records, &needle), limit)
}

/// Fan-out search sized to the rayon pool.
#[must_use]
pub fn parallel_search(records: &[Hadith], query: &str, limit: usize) -> Vec<SearchHit> {
    parallel_search_with_workers(records, query, limit, rayon::current_num_threads())
}

/// Fan-out search over at most `workers` contiguous chunks.
///
/// Inputs smaller than [`PARALLEL_THRESHOLD`] take the sequential path.
#[must_use]
pub fn parallel_search_with_workers(
    records: &[Hadith],
    query: &str,
    limit: usize,
    workers: usize,
) -> Vec<SearchHit> {
    if records.len() < PARALLEL_THRESHOLD {
        return sequential_search(records, query, limit);
    }
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    finish(fan_out(records, &needle, workers), limit)
}

/// List records in browse order (book, then number) with score 0.
#[must_use]
pub fn browse(records: &[Hadith]) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = records
        .iter()
        .map(|h| SearchHit { hadith: h.clone(), score: 0 })
        .collect();
    hits.sort_by(|a, b| {
        a.hadith
            .book
            .cmp(&b.hadith.book)
            .then_with(|| a.hadith.number.cmp(&b.hadith.number))
    });
    hits
}

/// Browse when the query is blank, search otherwise; `limit == 0` is unbounded.
#[must_use]
pub fn search_or_browse(records: &[Hadith], query: &str, limit: usize) -> Vec<SearchHit> {
    if !query.trim().is_empty() {
        return search(records, query, limit);
    }
    let mut hits = browse(records);
    if limit > 0 {
        hits.truncate(limit);
    }
    hits
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn score_chunk(records: &[Hadith], needle: &str) -> Vec<SearchHit> {
    records
        .iter()
        .filter_map(|h| {
            let score = score_record(h, needle);
            (score > 0).then(|| SearchHit { hadith: h.clone(), score })
        })
        .collect()
}

/// Score contiguous chunks concurrently and concatenate in chunk order.
pub(crate) fn fan_out(records: &[Hadith], needle: &str, workers: usize) -> Vec<SearchHit> {
    if records.is_empty() {
        return Vec::new();
    }
    let chunks = workers.clamp(1, records.len());
    let chunk_len = records.len().div_ceil(chunks);

    let partials: Vec<Vec<SearchHit>> = records
        .par_chunks(chunk_len)
        .map(|chunk| score_chunk(chunk, needle))
        .collect();

    partials.into_iter().flatten().collect()
}

fn finish(mut hits: Vec<SearchHit>, limit: usize) -> Vec<SearchHit> {
    hits.sort_by(compare_hits);
    if limit > 0 {
        hits.truncate(limit);
    }
    hits
}
