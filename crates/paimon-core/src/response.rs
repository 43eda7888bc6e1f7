//! Response types for answer generation.

use serde::{Deserialize, Serialize};

use crate::model::GenerationStyle;
use crate::passage::Context;

/// Metadata reported alongside every generated answer.
///
/// Serializes as a flat map of string keys to scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMeta {
    /// Model that produced the answer.
    pub model: String,
    /// Style the model generated with.
    pub style: GenerationStyle,
    /// Whitespace-token count of the query plus all context texts.
    pub tokens_estimate: usize,
    /// Number of contexts supplied to generation.
    pub context_count: usize,
}

/// A generated answer and its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generated answer text.
    pub answer: String,
    /// Generation metadata.
    pub meta: GenerationMeta,
}

/// Full response to a question: the answer plus the contexts it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Generated answer text.
    pub answer: String,
    /// Retrieved supporting contexts, best first.
    pub contexts: Vec<Context>,
    /// Model used for generation.
    pub model: String,
    /// Generation metadata.
    pub meta: GenerationMeta,
}

impl Answer {
    /// Assembles an answer from a generation result and its contexts.
    #[must_use]
    pub fn new(result: GenerationResult, contexts: Vec<Context>) -> Self {
        Self {
            answer: result.answer,
            contexts,
            model: result.meta.model.clone(),
            meta: result.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_serializes_flat() {
        let meta = GenerationMeta {
            model: "gpt-balanced".to_string(),
            style: GenerationStyle::Balanced,
            tokens_estimate: 12,
            context_count: 3,
        };

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["model"], "gpt-balanced");
        assert_eq!(json["style"], "balanced");
        assert_eq!(json["tokens_estimate"], 12);
        assert_eq!(json["context_count"], 3);
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_answer_takes_model_from_meta() {
        let result = GenerationResult {
            answer: "text".to_string(),
            meta: GenerationMeta {
                model: "gpt-mini".to_string(),
                style: GenerationStyle::Concise,
                tokens_estimate: 1,
                context_count: 0,
            },
        };

        let answer = Answer::new(result, Vec::new());
        assert_eq!(answer.model, "gpt-mini");
        assert!(answer.contexts.is_empty());
    }
}
