//! Overlapping text chunker
//!
//! Splits page text into retrieval-sized segments. Cuts prefer, in order:
//! paragraph breaks, line breaks, sentence ends, word boundaries, and only
//! then a hard character cut. Consecutive chunks from the same page share an
//! overlapping region so retrieval context survives chunk boundaries.

use serde::{Deserialize, Serialize};

use crate::document::loader::PageText;
use crate::errors::{RagError, Result};

/// Chunker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// A contiguous span of document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The text content
    pub text: String,
    /// Source page number
    pub page: u32,
    /// Chunk position within the document
    pub index: usize,
}

/// Splits page text into overlapping chunks
#[derive(Debug, Clone)]
pub struct TextChunker {
    config: ChunkerConfig,
}

/// Boundary preference, most desirable first
const SEPARATORS: [&[char]; 4] = [&['\n', '\n'], &['\n'], &['.', ' '], &[' ']];

impl TextChunker {
    /// Create a chunker with default configuration
    pub fn new() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split pages into chunks, in page order
    ///
    /// Fails with `EmptyInput` when no page contains extractable text.
    pub fn split(&self, pages: &[PageText]) -> Result<Vec<Chunk>> {
        if pages.is_empty() {
            return Err(RagError::EmptyInput);
        }

        let mut chunks = Vec::new();
        for page in pages {
            self.split_page(page, &mut chunks);
        }

        if chunks.is_empty() {
            return Err(RagError::EmptyInput);
        }
        Ok(chunks)
    }

    fn split_page(&self, page: &PageText, out: &mut Vec<Chunk>) {
        let chars: Vec<char> = page.text.chars().collect();
        if chars.iter().all(|c| c.is_whitespace()) {
            return;
        }

        let size = self.config.chunk_size.max(1);
        let overlap = self.config.chunk_overlap.min(size.saturating_sub(1));
        let total = chars.len();
        let mut start = 0;

        while start < total {
            let hard_end = (start + size).min(total);
            let end = if hard_end < total {
                split_point(&chars, start, hard_end)
            } else {
                hard_end
            };

            out.push(Chunk {
                text: chars[start..end].iter().collect(),
                page: page.number,
                index: out.len(),
            });

            if end >= total {
                break;
            }
            // Step back by the overlap, but always make forward progress
            // even when a boundary cut produced a chunk shorter than it.
            start = if end > start + overlap { end - overlap } else { end };
        }
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the best cut position in `chars[start..hard_end]`
///
/// Scans backwards for each separator in preference order and cuts just
/// after it; falls back to the hard character cut when none is present.
fn split_point(chars: &[char], start: usize, hard_end: usize) -> usize {
    for sep in SEPARATORS {
        let len = sep.len();
        if hard_end - start < len {
            continue;
        }
        let mut pos = hard_end - len;
        loop {
            if &chars[pos..pos + len] == sep {
                return pos + len;
            }
            if pos == start {
                break;
            }
            pos -= 1;
        }
    }
    hard_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn page(text: &str) -> PageText {
        PageText {
            number: 1,
            text: text.to_string(),
        }
    }

    fn small_chunker(size: usize, overlap: usize) -> TextChunker {
        TextChunker::with_config(ChunkerConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        })
    }

    #[test]
    fn test_default_config() {
        let chunker = TextChunker::new();
        assert_eq!(chunker.config().chunk_size, 1000);
        assert_eq!(chunker.config().chunk_overlap, 200);
    }

    #[test]
    fn test_empty_pages_rejected() {
        let chunker = TextChunker::new();
        assert!(matches!(chunker.split(&[]), Err(RagError::EmptyInput)));
    }

    #[test]
    fn test_whitespace_only_rejected() {
        let chunker = TextChunker::new();
        let result = chunker.split(&[page("   \n\n  \t ")]);
        assert!(matches!(result, Err(RagError::EmptyInput)));
    }

    #[test]
    fn test_short_page_single_chunk() {
        let chunker = TextChunker::new();
        let chunks = chunker.split(&[page("Short page text.")]).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Short page text.");
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_deterministic() {
        let chunker = small_chunker(50, 10);
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let first = chunker.split(&[page(&text)]).unwrap();
        let second = chunker.split(&[page(&text)]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunk_size_bound() {
        let chunker = small_chunker(100, 20);
        let text = "word ".repeat(500);
        let chunks = chunker.split(&[page(&text)]).unwrap();
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
    }

    #[test]
    fn test_overlap_shared_between_neighbors() {
        let chunker = small_chunker(100, 20);
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let chunks = chunker.split(&[page(&text)]).unwrap();
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let tail: Vec<char> = pair[0].text.chars().collect();
            let head: Vec<char> = pair[1].text.chars().take(20).collect();
            let shared = 20.min(tail.len());
            assert_eq!(&tail[tail.len() - shared..], &head[..shared]);
        }
    }

    #[test]
    fn test_prefers_paragraph_boundary() {
        let chunker = small_chunker(100, 0);
        let text = format!("{}\n\n{}", "a".repeat(50), "b".repeat(100));
        let chunks = chunker.split(&[page(&text)]).unwrap();
        assert!(chunks[0].text.ends_with("\n\n"));
        assert!(chunks[1].text.starts_with('b'));
    }

    #[test]
    fn test_prefers_sentence_over_word_boundary() {
        let chunker = small_chunker(40, 0);
        let text = "First sentence here. Second part of the text continues on";
        let chunks = chunker.split(&[page(text)]).unwrap();
        assert_eq!(chunks[0].text, "First sentence here. ");
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        let chunker = small_chunker(10, 0);
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunker.split(&[page(text)]).unwrap();
        assert_eq!(chunks[0].text, "abcdefghij");
        assert_eq!(chunks[1].text, "klmnopqrst");
        assert_eq!(chunks[2].text, "uvwxyz");
    }

    #[test]
    fn test_multiple_pages_keep_page_numbers() {
        let chunker = TextChunker::new();
        let pages = vec![
            PageText {
                number: 1,
                text: "Page one text.".to_string(),
            },
            PageText {
                number: 2,
                text: "Page two text.".to_string(),
            },
        ];
        let chunks = chunker.split(&pages).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[1].page, 2);
        assert_eq!(chunks[1].index, 1);
    }

    #[quickcheck]
    fn prop_chunks_within_size_bound(text: String) -> bool {
        let chunker = small_chunker(64, 16);
        match chunker.split(&[page(&text)]) {
            Ok(chunks) => chunks.iter().all(|c| c.text.chars().count() <= 64),
            // Whitespace-only input is rejected, which satisfies the bound.
            Err(_) => true,
        }
    }
}
