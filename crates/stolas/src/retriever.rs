//! Top-k retrieval over a passage store.

use std::sync::Arc;

use paimon_core::ScoredPassage;

use crate::scorer::{Scorer, TermOverlapScorer};
use crate::store::PassageStore;
use crate::tokenizer::tokenize_unique;

/// Configuration for retrieval.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Number of passages to return when the caller does not say.
    pub default_top_k: usize,
    /// Drop passages scoring below this. `None` keeps zero-score passages.
    pub min_score: Option<f32>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 3,
            min_score: None,
        }
    }
}

/// Ranks stored passages against a query.
pub struct Retriever {
    store: Arc<dyn PassageStore>,
    scorer: Arc<dyn Scorer>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Creates a retriever with the default term-overlap scorer.
    #[must_use]
    pub fn new(store: Arc<dyn PassageStore>, config: RetrievalConfig) -> Self {
        Self::with_scorer(store, Arc::new(TermOverlapScorer::new()), config)
    }

    /// Creates a retriever with a custom scorer.
    #[must_use]
    pub fn with_scorer(
        store: Arc<dyn PassageStore>,
        scorer: Arc<dyn Scorer>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            scorer,
            config,
        }
    }

    /// Retrieves at most `top_k` passages, best first.
    ///
    /// Every passage is scored; ties keep store insertion order. With no
    /// `min_score` configured the result has exactly
    /// `min(top_k, corpus size)` entries.
    #[must_use]
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredPassage> {
        if top_k == 0 {
            return Vec::new();
        }

        let query_terms = tokenize_unique(query);
        let passages = self.store.list();

        let mut results: Vec<ScoredPassage> = passages
            .into_iter()
            .map(|passage| {
                let score = self.scorer.score_terms(&query_terms, &passage.text);
                ScoredPassage::new(passage, score)
            })
            .filter(|r| self.config.min_score.map_or(true, |min| r.score >= min))
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);

        tracing::debug!(
            scorer = self.scorer.name(),
            query_terms = query_terms.len(),
            top_k,
            returned = results.len(),
            best = results.first().map_or(0.0, |r| r.score),
            "Retrieval complete"
        );

        results
    }

    /// Retrieves using the configured default `top_k`.
    #[must_use]
    pub fn retrieve_default(&self, query: &str) -> Vec<ScoredPassage> {
        self.retrieve(query, self.config.default_top_k)
    }

    /// Returns the retrieval configuration.
    #[must_use]
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn PassageStore> {
        &self.store
    }
}
