//! # Paimon Core
//!
//! Core types and traits for the Paimon FAQ pipeline.
//!
//! This crate provides the foundational abstractions shared by every Paimon component:
//! - Common error types
//! - Passages, scored passages and the contexts handed to generation
//! - Model catalog entries and generation styles
//! - Generation request/response structures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod model;
pub mod passage;
pub mod request;
pub mod response;

pub use error::{Error, Result};
pub use model::{GenerationStyle, ModelSpec};
pub use passage::{Context, Passage, ScoredPassage};
pub use request::GenerationRequest;
pub use response::{Answer, GenerationMeta, GenerationResult};
