//! Request types for answer generation.

use serde::{Deserialize, Serialize};

use crate::model::GenerationStyle;
use crate::passage::Context;

/// Everything a generation backend needs to produce one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user question.
    pub query: String,
    /// Ranked supporting contexts (may be empty).
    pub contexts: Vec<Context>,
    /// Name of the model that is answering.
    pub model: String,
    /// Style selected for the model.
    pub style: GenerationStyle,
}

impl GenerationRequest {
    /// Creates a new generation request.
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        contexts: Vec<Context>,
        model: impl Into<String>,
        style: GenerationStyle,
    ) -> Self {
        Self {
            query: query.into(),
            contexts,
            model: model.into(),
            style,
        }
    }

    /// Estimated work for this request: whitespace tokens in the query plus
    /// all context texts.
    #[must_use]
    pub fn tokens_estimate(&self) -> usize {
        let context_tokens: usize = self
            .contexts
            .iter()
            .map(|c| c.text.split_whitespace().count())
            .sum();
        self.query.split_whitespace().count() + context_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_estimate_counts_query_and_contexts() {
        let request = GenerationRequest::new(
            "What is the refund policy?",
            vec![
                Context::new("a", 1.0, "thirty day refunds"),
                Context::new("b", 0.5, "  contact   support  "),
            ],
            "gpt-mini",
            GenerationStyle::Concise,
        );
        // 5 + 3 + 2
        assert_eq!(request.tokens_estimate(), 10);
    }

    #[test]
    fn test_tokens_estimate_without_contexts() {
        let request =
            GenerationRequest::new("reset password", vec![], "gpt-mini", GenerationStyle::Concise);
        assert_eq!(request.tokens_estimate(), 2);
    }
}
