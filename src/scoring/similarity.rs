//! Similarity scoring between expected and generated answers
//!
//! Combines a character-level sequence ratio (matching-blocks measure) with
//! word-set overlap. Both strings are normalised first: whitespace runs
//! collapse to single spaces and characters outside alphanumerics,
//! whitespace and basic punctuation are dropped.

use std::collections::HashMap;
use std::collections::HashSet;

/// Weight of the character-level sequence ratio in the final score
const SEQUENCE_WEIGHT: f64 = 0.6;

/// Weight of the word-overlap ratio in the final score
const WORD_OVERLAP_WEIGHT: f64 = 0.4;

/// Score how closely a generated answer matches the expected one
///
/// Returns a value in [0, 1] rounded to 3 decimal places; 0.0 when either
/// input is empty or the expected answer has no words after normalisation.
pub fn similarity_score(expected: &str, actual: &str) -> f64 {
    if expected.is_empty() || actual.is_empty() {
        return 0.0;
    }

    let expected_clean = clean_text(expected);
    let actual_clean = clean_text(actual);

    let ratio = sequence_ratio(&expected_clean, &actual_clean);

    let expected_lower = expected_clean.to_lowercase();
    let actual_lower = actual_clean.to_lowercase();
    let expected_words: HashSet<&str> = expected_lower.split_whitespace().collect();
    let actual_words: HashSet<&str> = actual_lower.split_whitespace().collect();

    if expected_words.is_empty() {
        return 0.0;
    }
    let word_overlap =
        expected_words.intersection(&actual_words).count() as f64 / expected_words.len() as f64;

    let score = ratio * SEQUENCE_WEIGHT + word_overlap * WORD_OVERLAP_WEIGHT;
    (score * 1000.0).round() / 1000.0
}

/// Normalise text for comparison
///
/// Collapses whitespace runs to single spaces, trims, then keeps only
/// alphanumerics, whitespace and `. , ! ? - _`.
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?' | '-' | '_')
        })
        .collect()
}

/// Character-level sequence similarity in [0, 1]
///
/// The classic matching-blocks ratio: twice the number of matching
/// characters over the total length of both strings. 1.0 for identical
/// strings, 0.0 for strings sharing no characters.
pub fn sequence_ratio(left: &str, right: &str) -> f64 {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total characters covered by the longest matching blocks
///
/// Recursively finds the longest common block, then matches the regions to
/// its left and right, mirroring the Ratcliff-Obershelp decomposition.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut matched = 0;
    let mut regions = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = regions.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            matched += size;
            regions.push((alo, i, blo, j));
            regions.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // j2len[j] = length of the match ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_j2len.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}
