//! In-memory vector index
//!
//! Owns the embedded chunks of the currently loaded document. The index is
//! built in one shot from (chunk, embedding) pairs and never mutated
//! afterwards; loading a new document replaces the whole index.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::chunker::Chunk;

/// A chunk together with its embedding, immutable once indexed
#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A search result: chunk plus similarity score and rank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub chunk: Chunk,
    pub score: f32,
    /// 0-based position in the result ordering
    pub rank: usize,
}

/// Nearest-neighbor index over chunk embeddings
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<EmbeddedChunk>,
}

impl VectorIndex {
    /// Build an index from embedded chunks
    pub fn new(entries: Vec<EmbeddedChunk>) -> Self {
        Self { entries }
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve the `top_k` chunks most similar to the query embedding
    ///
    /// Results are ordered by descending cosine similarity.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<SearchHit> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (idx, cosine_similarity(query, &entry.embedding)))
            .collect();

        scored.sort_by(|left, right| {
            right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_k);

        scored
            .into_iter()
            .enumerate()
            .map(|(rank, (idx, score))| SearchHit {
                chunk: self.entries[idx].chunk.clone(),
                score,
                rank,
            })
            .collect()
    }
}

/// Cosine similarity between two vectors
///
/// Returns 0.0 for mismatched lengths or zero-magnitude inputs.
fn cosine_similarity(left: &[f32], right: &[f32]) -> f32 {
    if left.len() != right.len() || left.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut left_sq = 0.0f32;
    let mut right_sq = 0.0f32;
    for (l, r) in left.iter().zip(right.iter()) {
        dot += l * r;
        left_sq += l * l;
        right_sq += r * r;
    }

    let denom = left_sq.sqrt() * right_sq.sqrt();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, index: usize, embedding: Vec<f32>) -> EmbeddedChunk {
        EmbeddedChunk {
            chunk: Chunk {
                text: text.to_string(),
                page: 1,
                index,
            },
            embedding,
        }
    }

    fn approx_eq(left: f32, right: f32) -> bool {
        (left - right).abs() < 1e-5
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let vec = vec![1.0, 2.0, 3.0, 4.0];
        assert!(approx_eq(cosine_similarity(&vec, &vec), 1.0));
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        assert!(approx_eq(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0));
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let index = VectorIndex::new(vec![
            entry("mostly sideways", 0, vec![0.5, 0.5]),
            entry("orthogonal", 1, vec![0.0, 1.0]),
            entry("aligned", 2, vec![1.0, 0.0]),
        ]);

        let hits = index.search(&[1.0, 0.0], 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].chunk.text, "aligned");
        assert_eq!(hits[0].rank, 0);
        assert_eq!(hits[2].chunk.text, "orthogonal");
        assert_eq!(hits[2].rank, 2);
    }

    #[test]
    fn test_search_truncates_to_top_k() {
        let index = VectorIndex::new(vec![
            entry("a", 0, vec![1.0, 0.0]),
            entry("b", 1, vec![0.9, 0.1]),
            entry("c", 2, vec![0.8, 0.2]),
        ]);

        let hits = index.search(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_empty_index() {
        let index = VectorIndex::default();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0], 3).is_empty());
    }
}
