//! Confidence estimation for generated answers
//!
//! A lexical-overlap heuristic, not a calibrated probability: it rewards
//! literal word overlap between the question and the retrieved chunks and
//! says nothing about semantic correctness.

use std::collections::HashSet;

use crate::index::SearchHit;

/// Corroboration boost applied when two or more chunks were retrieved
const MULTI_SOURCE_BOOST: f64 = 1.2;

/// Estimate answer confidence from question/context word overlap
///
/// Overlap counts are summed per chunk and normalised by
/// (question words x retrieved chunks), boosted when multiple chunks
/// corroborate, clamped to 1.0 and rounded to 2 decimal places.
/// Returns 0.0 when nothing was retrieved.
pub fn estimate(question: &str, hits: &[SearchHit]) -> f64 {
    if hits.is_empty() {
        return 0.0;
    }

    let question_lower = question.to_lowercase();
    let question_words: HashSet<&str> = question_lower.split_whitespace().collect();

    let mut total_overlap = 0usize;
    for hit in hits {
        let chunk_lower = hit.chunk.text.to_lowercase();
        let chunk_words: HashSet<&str> = chunk_lower.split_whitespace().collect();
        total_overlap += question_words.intersection(&chunk_words).count();
    }

    let max_possible = question_words.len() * hits.len();
    if max_possible == 0 {
        return 0.0;
    }

    let mut confidence = (total_overlap as f64 / max_possible as f64).min(1.0);
    if hits.len() >= 2 {
        confidence = (confidence * MULTI_SOURCE_BOOST).min(1.0);
    }

    (confidence * 100.0).round() / 100.0
}
