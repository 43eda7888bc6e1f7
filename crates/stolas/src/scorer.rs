//! Relevance scoring between a query and a passage.

use crate::tokenizer::{term_set, tokenize_unique};

/// Trait for pluggable relevance scorers.
///
/// Implementations must be pure: identical inputs always give identical
/// scores, and scores are never negative.
pub trait Scorer: Send + Sync {
    /// Scores `text` against pre-tokenized, deduplicated query terms.
    fn score_terms(&self, query_terms: &[String], text: &str) -> f32;

    /// Scores `text` against a raw query.
    fn score(&self, query: &str, text: &str) -> f32 {
        self.score_terms(&tokenize_unique(query), text)
    }

    /// Returns the scorer name, for logging.
    fn name(&self) -> &'static str;
}

/// Fraction of distinct query terms that occur in the passage.
///
/// The score lies in `[0, 1]`. Adding a query term that the passage contains
/// never lowers the score, and a query with no overlap scores exactly `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermOverlapScorer;

impl TermOverlapScorer {
    /// Creates a new term-overlap scorer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for TermOverlapScorer {
    fn score_terms(&self, query_terms: &[String], text: &str) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }

        let passage_terms = term_set(text);
        let matched = query_terms
            .iter()
            .filter(|t| passage_terms.contains(t.as_str()))
            .count();

        matched as f32 / query_terms.len() as f32
    }

    fn name(&self) -> &'static str {
        "term_overlap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAQ: &str = "Q: How to reset my password?\nA: You can reset your password via the \
                       'Forgot Password' link on the login page.";

    #[test]
    fn test_full_overlap() {
        let scorer = TermOverlapScorer::new();
        assert!((scorer.score("reset password", FAQ) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_overlap() {
        let scorer = TermOverlapScorer::new();
        // "reset" matches, "invoice" does not
        assert!((scorer.score("reset invoice", FAQ) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let scorer = TermOverlapScorer::new();
        assert_eq!(scorer.score("zzz-no-match-xyz", FAQ), 0.0);
    }

    #[test]
    fn test_empty_query_is_zero() {
        let scorer = TermOverlapScorer::new();
        assert_eq!(scorer.score("", FAQ), 0.0);
        assert_eq!(scorer.score("?!", FAQ), 0.0);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let scorer = TermOverlapScorer::new();
        assert_eq!(
            scorer.score("RESET, PASSWORD!", FAQ),
            scorer.score("reset password", FAQ)
        );
    }

    #[test]
    fn test_duplicate_query_terms_do_not_inflate() {
        let scorer = TermOverlapScorer::new();
        assert_eq!(
            scorer.score("reset reset reset invoice", FAQ),
            scorer.score("reset invoice", FAQ)
        );
    }

    #[test]
    fn test_adding_overlapping_terms_never_decreases() {
        let scorer = TermOverlapScorer::new();
        let queries = [
            "billing",
            "billing reset",
            "billing reset password",
            "billing reset password login",
            "billing reset password login page",
        ];

        let scores: Vec<f32> = queries.iter().map(|q| scorer.score(q, FAQ)).collect();
        for pair in scores.windows(2) {
            assert!(pair[1] >= pair[0], "score dropped: {:?}", scores);
        }
    }

    #[test]
    fn test_deterministic() {
        let scorer = TermOverlapScorer::new();
        let first = scorer.score("how do I reset my password", FAQ);
        for _ in 0..10 {
            assert_eq!(scorer.score("how do I reset my password", FAQ), first);
        }
    }
}
