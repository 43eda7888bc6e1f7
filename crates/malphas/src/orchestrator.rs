//! Generation orchestration.
//!
//! Combines a question, its retrieved contexts and the active model into a
//! [`GenerationRequest`], hands it to the backend and attaches metadata.

use std::sync::Arc;

use abaddon::GenerationBackend;
use paimon_core::{Context, Error, GenerationMeta, GenerationRequest, GenerationResult, Result};

use crate::registry::ModelRegistry;

/// Drives a generation backend with the currently active model.
pub struct Orchestrator {
    registry: Arc<ModelRegistry>,
    backend: Arc<dyn GenerationBackend>,
}

impl Orchestrator {
    /// Creates an orchestrator over a registry and backend.
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self { registry, backend }
    }

    /// Generates an answer for `query` from `contexts`.
    ///
    /// The active model is read once, so a concurrent switch affects either
    /// the whole call or none of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the backend fails or produces an
    /// empty answer.
    pub async fn generate(&self, query: &str, contexts: &[Context]) -> Result<GenerationResult> {
        let model = self.registry.get_active().clone();
        let request = GenerationRequest::new(query, contexts.to_vec(), &model.name, model.style);
        let tokens_estimate = request.tokens_estimate();

        if !self.backend.is_ready() {
            return Err(Error::generation(self.backend.name(), "backend is not ready"));
        }

        let answer = self.backend.produce(&request).await.map_err(|e| match e {
            e @ Error::Generation { .. } => e,
            other => Error::generation(self.backend.name(), other.to_string()),
        })?;

        if answer.trim().is_empty() {
            return Err(Error::generation(self.backend.name(), "backend returned an empty answer"));
        }

        tracing::debug!(
            model = %model.name,
            style = %model.style,
            context_count = contexts.len(),
            tokens_estimate,
            "Generation complete"
        );

        Ok(GenerationResult {
            answer,
            meta: GenerationMeta {
                model: model.name,
                style: model.style,
                tokens_estimate,
                context_count: contexts.len(),
            },
        })
    }

    /// Returns the model registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }
}
