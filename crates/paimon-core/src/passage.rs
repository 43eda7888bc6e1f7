//! Passages and retrieval results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of retrievable content.
///
/// Passages are immutable once created. Stores hand them out as
/// `Arc<Passage>` so results outlive any later store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Unique identifier.
    pub id: String,
    /// Provenance label (document name, FAQ key).
    pub source: String,
    /// Indexed text content.
    pub text: String,
}

impl Passage {
    /// Creates a new passage with a fresh identifier.
    #[must_use]
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            text: text.into(),
        }
    }
}

/// A passage paired with its relevance score for one query.
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    /// The matched passage.
    pub passage: Arc<Passage>,
    /// Relevance score (higher = more relevant).
    pub score: f32,
}

impl ScoredPassage {
    /// Creates a new scored passage.
    #[must_use]
    pub fn new(passage: Arc<Passage>, score: f32) -> Self {
        Self { passage, score }
    }

    /// Converts into the context shape consumed by generation.
    #[must_use]
    pub fn to_context(&self) -> Context {
        Context {
            source: self.passage.source.clone(),
            score: self.score,
            text: self.passage.text.clone(),
        }
    }
}

/// A retrieved passage as supplied to generation and returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Provenance label of the passage.
    pub source: String,
    /// Relevance score.
    pub score: f32,
    /// Passage text.
    pub text: String,
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub fn new(source: impl Into<String>, score: f32, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            score,
            text: text.into(),
        }
    }
}

impl From<&ScoredPassage> for Context {
    fn from(scored: &ScoredPassage) -> Self {
        scored.to_context()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passage_ids_are_unique() {
        let a = Passage::new("same text", "doc");
        let b = Passage::new("same text", "doc");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_scored_passage_to_context() {
        let passage = Arc::new(Passage::new("Q: hi\nA: hello", "seed_faq_9"));
        let scored = ScoredPassage::new(Arc::clone(&passage), 0.5);
        let context = Context::from(&scored);

        assert_eq!(context.source, "seed_faq_9");
        assert_eq!(context.text, passage.text);
        assert!((context.score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_context_wire_shape() {
        let context = Context::new("seed_faq_1", 1.0, "text");
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["source"], "seed_faq_1");
        assert_eq!(json["text"], "text");
        assert_eq!(json["score"], 1.0);
    }
}
