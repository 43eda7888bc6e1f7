//! # Stolas
//!
//! *"The Prince reveals hidden knowledge"*
//!
//! Stolas is the knowledge engine for Paimon, holding the passage corpus and
//! ranking it against free-text questions.
//!
//! ## Features
//!
//! - **Passage Store**: append-only, in-memory corpus with stable identifiers
//! - **Lexical Ranking**: deterministic term-overlap scoring
//! - **Top-k Retrieval**: stable ranking with reproducible tie-breaks
//! - **Seed Corpus**: the built-in FAQ entries loaded at startup
//!
//! The retriever re-scores the whole corpus on every query. That is fine for
//! FAQ-sized corpora; an inverted index is the next step if the corpus grows.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod retriever;
pub mod scorer;
pub mod seed;
pub mod store;
pub mod tokenizer;

pub use retriever::{RetrievalConfig, Retriever};
pub use scorer::{Scorer, TermOverlapScorer};
pub use store::{InMemoryStore, PassageStore};
