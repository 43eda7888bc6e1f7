//! # Malphas
//!
//! *"The Builder constructs order from chaos"*
//!
//! Malphas is the orchestration layer for Paimon. It owns the model registry,
//! drives generation with the active model and wires retrieval and
//! generation together behind the [`Malphas`] facade.
//!
//! ## Features
//!
//! - **Model Registry**: fixed catalog with an atomically switchable active model
//! - **Orchestration**: query + contexts + active model → answer with metadata
//! - **Pipeline Facade**: retrieve, generate and answer in one place

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod orchestrator;
pub mod registry;

pub use orchestrator::Orchestrator;
pub use registry::ModelRegistry;

use std::sync::Arc;

use abaddon::{GenerationBackend, TemplateBackend};
use dantalion::{MetricsSnapshot, PipelineMetrics, Timer};
use paimon_core::{Answer, Context, Error, GenerationResult, ModelSpec, Passage, Result};
use stolas::seed::seed_store;
use stolas::{InMemoryStore, PassageStore, RetrievalConfig, Retriever};

/// Settings for assembling a [`Malphas`] pipeline.
#[derive(Debug, Clone)]
pub struct MalphasConfig {
    /// Model active at startup.
    pub default_model: String,
    /// Retrieval settings.
    pub retrieval: RetrievalConfig,
    /// Maximum context snippets rendered by the template backend.
    pub max_snippets: usize,
    /// Load the built-in FAQ entries at startup.
    pub seed: bool,
}

impl Default for MalphasConfig {
    fn default() -> Self {
        Self {
            default_model: ModelSpec::DEFAULT_MODEL.to_string(),
            retrieval: RetrievalConfig::default(),
            max_snippets: 3,
            seed: true,
        }
    }
}

impl MalphasConfig {
    /// Sets the startup model.
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Sets the default number of retrieved passages.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.retrieval.default_top_k = top_k;
        self
    }

    /// Sets the minimum retrieval score.
    #[must_use]
    pub fn with_min_score(mut self, min_score: Option<f32>) -> Self {
        self.retrieval.min_score = min_score;
        self
    }

    /// Sets the snippet limit for the template backend.
    #[must_use]
    pub fn with_max_snippets(mut self, max_snippets: usize) -> Self {
        self.max_snippets = max_snippets;
        self
    }

    /// Starts with an empty corpus instead of the built-in FAQ entries.
    #[must_use]
    pub fn without_seed(mut self) -> Self {
        self.seed = false;
        self
    }
}

/// The FAQ pipeline: retrieval, model selection and generation.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Malphas {
    retriever: Retriever,
    orchestrator: Orchestrator,
    registry: Arc<ModelRegistry>,
    metrics: PipelineMetrics,
}

impl std::fmt::Debug for Malphas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Malphas")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Malphas {
    /// Builds a pipeline with an in-memory store and the template backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the default model is not in the catalog or
    /// seeding fails.
    pub fn new(config: MalphasConfig) -> Result<Self> {
        let backend = TemplateBackend::new().with_max_snippets(config.max_snippets);
        Self::with_backend(config, Arc::new(InMemoryStore::new()), Arc::new(backend))
    }

    /// Builds a pipeline over a caller-supplied store and backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the default model is not in the catalog or
    /// seeding fails.
    pub fn with_backend(
        config: MalphasConfig,
        store: Arc<dyn PassageStore>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Result<Self> {
        let registry = Arc::new(ModelRegistry::builtin(&config.default_model)?);

        if config.seed {
            seed_store(store.as_ref())?;
        }

        tracing::info!(
            backend = backend.name(),
            active_model = %registry.active_name(),
            top_k = config.retrieval.default_top_k,
            "Pipeline ready"
        );

        Ok(Self {
            retriever: Retriever::new(store, config.retrieval),
            orchestrator: Orchestrator::new(Arc::clone(&registry), backend),
            registry,
            metrics: PipelineMetrics::new(),
        })
    }

    /// Retrieves up to `top_k` contexts for `query`, best first.
    ///
    /// A non-positive `top_k` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty or whitespace-only query.
    pub fn retrieve(&self, query: &str, top_k: i64) -> Result<Vec<Context>> {
        ensure_query(query)?;

        let top_k = usize::try_from(top_k).unwrap_or(0);
        let timer = Timer::start("retrieve");

        let contexts: Vec<Context> = self
            .retriever
            .retrieve(query, top_k)
            .iter()
            .map(Context::from)
            .collect();

        self.metrics.record_retrieval(contexts.len());
        tracing::debug!(
            query_len = query.len(),
            top_k,
            returned = contexts.len(),
            elapsed_ms = timer.stop(),
            "Retrieved contexts"
        );

        Ok(contexts)
    }

    /// Generates an answer from `query` and caller-chosen contexts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty or whitespace-only query,
    /// or [`Error::Generation`] if the backend fails.
    pub async fn generate(&self, query: &str, contexts: &[Context]) -> Result<GenerationResult> {
        ensure_query(query)?;

        match self.orchestrator.generate(query, contexts).await {
            Ok(result) => {
                self.metrics.record_generation(result.meta.tokens_estimate);
                Ok(result)
            }
            Err(e) => {
                self.metrics.record_generation_failure();
                tracing::error!(error = %e, model = %self.registry.active_name(), "Generation failed");
                Err(e)
            }
        }
    }

    /// Answers a question end to end: retrieve, then generate.
    ///
    /// `top_k` defaults to the configured value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty or whitespace-only query,
    /// or [`Error::Generation`] if the backend fails.
    pub async fn answer(&self, query: &str, top_k: Option<i64>) -> Result<Answer> {
        let top_k = top_k.unwrap_or_else(|| {
            i64::try_from(self.retriever.config().default_top_k).unwrap_or(i64::MAX)
        });
        let contexts = self.retrieve(query, top_k)?;
        let result = self.generate(query, &contexts).await?;

        tracing::info!(
            model = %result.meta.model,
            context_count = result.meta.context_count,
            tokens_estimate = result.meta.tokens_estimate,
            "Answered question"
        );

        Ok(Answer::new(result, contexts))
    }

    /// Lists the model catalog.
    #[must_use]
    pub fn list_models(&self) -> &[ModelSpec] {
        self.registry.list_models()
    }

    /// Returns the active model.
    #[must_use]
    pub fn active_model(&self) -> &ModelSpec {
        self.registry.get_active()
    }

    /// Switches the active model. Returns `false` for unknown names.
    pub fn set_active_model(&self, name: &str) -> bool {
        let accepted = self.registry.set_active(name);
        self.metrics.record_model_switch(accepted);
        accepted
    }

    /// Adds a passage to the corpus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `text` is empty.
    pub fn add_passage(&self, text: &str, source: &str) -> Result<Arc<Passage>> {
        self.retriever.store().add(text, source)
    }

    /// Returns the number of stored passages.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.retriever.store().len()
    }

    /// Returns the configured default `top_k`.
    #[must_use]
    pub fn default_top_k(&self) -> usize {
        self.retriever.config().default_top_k
    }

    /// Returns a snapshot of pipeline counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

fn ensure_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(Error::invalid_input("query must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use abaddon::NO_CONTEXT_SENTINEL;
    use async_trait::async_trait;
    use paimon_core::GenerationRequest;

    use super::*;

    fn pipeline() -> Malphas {
        Malphas::new(MalphasConfig::default()).unwrap()
    }

    #[test]
    fn test_seeded_on_startup() {
        let malphas = pipeline();
        assert_eq!(malphas.passage_count(), 5);
        assert_eq!(malphas.active_model().name, "gpt-mini");
        assert_eq!(malphas.default_top_k(), 3);
    }

    #[test]
    fn test_unseeded_pipeline_is_empty() {
        let malphas = Malphas::new(MalphasConfig::default().without_seed()).unwrap();
        assert_eq!(malphas.passage_count(), 0);
        assert!(malphas.retrieve("reset password", 3).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_default_model_is_rejected() {
        let result = Malphas::new(MalphasConfig::default().with_default_model("gpt-huge"));
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_retrieve_bounds() {
        let malphas = pipeline();

        assert!(malphas.retrieve("reset password", 0).unwrap().is_empty());
        assert!(malphas.retrieve("reset password", -4).unwrap().is_empty());
        assert_eq!(malphas.retrieve("reset password", 2).unwrap().len(), 2);
        assert_eq!(malphas.retrieve("reset password", 50).unwrap().len(), 5);
    }

    #[test]
    fn test_retrieve_reset_password() {
        let malphas = pipeline();
        let contexts = malphas.retrieve("reset password", 1).unwrap();

        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].source, "seed_faq_1");
        assert!(contexts[0].score > 0.0);
    }

    #[test]
    fn test_retrieve_no_match_keeps_insertion_order() {
        let malphas = pipeline();
        let contexts = malphas.retrieve("zzz-no-match-xyz", 3).unwrap();

        let sources: Vec<_> = contexts.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["seed_faq_1", "seed_faq_2", "seed_faq_3"]);
        assert!(contexts.iter().all(|c| c.score == 0.0));
    }

    #[test]
    fn test_added_passage_is_retrievable() {
        let malphas = pipeline();
        malphas
            .add_passage("Q: Do you ship abroad?\nA: We ship to 40 countries.", "manual")
            .unwrap();

        let contexts = malphas.retrieve("ship abroad", 1).unwrap();
        assert_eq!(contexts[0].source, "manual");
        assert!(malphas.add_passage("  ", "manual").is_err());
    }

    #[tokio::test]
    async fn test_answer_end_to_end() {
        let malphas = pipeline();
        let answer = malphas.answer("What is the refund policy?", None).await.unwrap();

        assert_eq!(answer.contexts.len(), 3);
        assert_eq!(answer.contexts[0].source, "seed_faq_2");
        assert_eq!(answer.model, "gpt-mini");
        assert_eq!(answer.meta.context_count, 3);
        assert!(answer.answer.contains("What is the refund policy?"));
    }

    #[tokio::test]
    async fn test_answer_rejects_empty_query() {
        let malphas = pipeline();
        let err = malphas.answer("   ", Some(3)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_retrieve_rejects_blank_query() {
        let malphas = pipeline();
        for query in ["", "   ", "\t\n"] {
            let err = malphas.retrieve(query, 3).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { .. }));
        }
        assert_eq!(malphas.metrics().retrievals, 0);
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_query() {
        let malphas = pipeline();
        let err = malphas.generate("", &[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));

        let contexts = malphas.retrieve("refund", 1).unwrap();
        let err = malphas.generate("  ", &contexts).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));

        let metrics = malphas.metrics();
        assert_eq!(metrics.generations, 0);
        assert_eq!(metrics.generation_failures, 0);
    }

    struct OfflineBackend;

    #[async_trait]
    impl GenerationBackend for OfflineBackend {
        async fn produce(&self, _request: &GenerationRequest) -> Result<String> {
            Err(Error::internal("upstream unavailable"))
        }

        fn name(&self) -> &str {
            "offline"
        }
    }

    #[tokio::test]
    async fn test_backend_failure_is_counted() {
        let malphas = Malphas::with_backend(
            MalphasConfig::default(),
            Arc::new(InMemoryStore::new()),
            Arc::new(OfflineBackend),
        )
        .unwrap();

        let err = malphas.answer("reset password", None).await.unwrap_err();
        assert!(err.is_generation_failure());

        let metrics = malphas.metrics();
        assert_eq!(metrics.generation_failures, 1);
        assert_eq!(metrics.generations, 0);
        assert_eq!(metrics.retrievals, 1);
    }

    #[tokio::test]
    async fn test_answer_with_zero_top_k_uses_sentinel() {
        let malphas = pipeline();
        let answer = malphas.answer("What is the refund policy?", Some(0)).await.unwrap();

        assert!(answer.contexts.is_empty());
        assert_eq!(answer.meta.context_count, 0);
        assert!(answer.answer.contains(NO_CONTEXT_SENTINEL));
    }

    #[tokio::test]
    async fn test_switching_models_changes_answers() {
        let malphas = pipeline();
        let before = malphas.answer("How do I contact support?", None).await.unwrap();

        assert!(malphas.set_active_model("gpt-analytic"));
        assert!(!malphas.set_active_model("nonexistent"));
        assert_eq!(malphas.active_model().name, "gpt-analytic");

        let after = malphas.answer("How do I contact support?", None).await.unwrap();
        assert_eq!(after.model, "gpt-analytic");
        assert_ne!(before.answer, after.answer);

        let metrics = malphas.metrics();
        assert_eq!(metrics.model_switches, 1);
        assert_eq!(metrics.rejected_switches, 1);
        assert_eq!(metrics.generations, 2);
        assert_eq!(metrics.retrievals, 2);
    }

    #[tokio::test]
    async fn test_concurrent_answers_and_switches() {
        let malphas = Arc::new(pipeline());
        let names: Vec<String> = malphas.list_models().iter().map(|m| m.name.clone()).collect();

        let mut handles = Vec::new();
        for i in 0..16 {
            let malphas = Arc::clone(&malphas);
            let name = names[i % names.len()].clone();
            handles.push(tokio::spawn(async move {
                malphas.set_active_model(&name);
                malphas.answer("reset password", Some(2)).await
            }));
        }

        for handle in handles {
            let answer = handle.await.unwrap().unwrap();
            assert!(names.contains(&answer.model));
            assert_eq!(answer.contexts.len(), 2);
        }
    }
}
