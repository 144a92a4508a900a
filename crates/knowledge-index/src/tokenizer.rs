//! Tokenization shared by the index builder and the query engine.
//!
//! The same pipeline MUST run at build and query time, otherwise query
//! vectors and document vectors live in different term spaces.

use std::collections::HashMap;

/// Minimum term length; shorter tokens are dropped as noise.
pub const MIN_TERM_LEN: usize = 2;

/// Tokenize text into normalized terms: case-folded, split on
/// non-alphanumeric runs, short tokens dropped. No stemming.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= MIN_TERM_LEN)
        .map(str::to_string)
        .collect()
}

/// Raw term counts for a piece of text.
pub fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
