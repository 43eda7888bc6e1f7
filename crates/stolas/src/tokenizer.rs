//! Text normalization for lexical scoring.
//!
//! Both queries and passages go through the same steps:
//! - Lowercase
//! - Split on non-alphanumeric characters
//! - Drop tokens shorter than 2 characters

use std::collections::HashSet;

/// Minimum token length kept by [`tokenize`].
pub const MIN_TOKEN_LEN: usize = 2;

/// Tokenizes text into normalized terms, in order of appearance.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.chars().count() >= MIN_TOKEN_LEN)
        .map(String::from)
        .collect()
}

/// Tokenizes and deduplicates, keeping first-occurrence order.
#[must_use]
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Returns the set of distinct normalized terms in `text`.
#[must_use]
pub fn term_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
