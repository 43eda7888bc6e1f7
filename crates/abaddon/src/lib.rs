//! # Abaddon
//!
//! *"The Destroyer renders judgment"*
//!
//! Abaddon is the generation layer for Paimon. It defines the contract every
//! answer-generation backend satisfies and ships the template backend used
//! when no language model is attached.
//!
//! ## Example
//!
//! ```ignore
//! use abaddon::{GenerationBackend, TemplateBackend};
//! use paimon_core::{Context, GenerationRequest, GenerationStyle};
//!
//! let backend = TemplateBackend::new();
//! let request = GenerationRequest::new(
//!     "How do I reset my password?",
//!     vec![Context::new("seed_faq_1", 1.0, "Use the Forgot Password link.")],
//!     "gpt-balanced",
//!     GenerationStyle::Balanced,
//! );
//! let answer = backend.produce(&request).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod template;

pub use backend::GenerationBackend;
pub use template::{TemplateBackend, NO_CONTEXT_SENTINEL};

// Re-exports from paimon-core
pub use paimon_core::{GenerationRequest, GenerationStyle};
