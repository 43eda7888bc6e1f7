//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use dantalion::MetricsSnapshot;
use paimon_core::{Answer, Context, GenerationMeta, ModelSpec};

// === Health ===

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `Healthy`.
    pub message: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Runtime status body.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Always `running`.
    pub status: String,
    /// Deployment environment name.
    pub environment: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Currently active model.
    pub active_model: String,
    /// Passages in the corpus.
    pub passages: usize,
    /// Pipeline counters.
    pub metrics: MetricsSnapshot,
}

// === FAQ ===

/// Question to answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    /// User question.
    pub query: String,
    /// Number of contexts to retrieve. Uses the server default when absent.
    #[serde(default)]
    pub top_k: Option<i64>,
}

/// Answer with the contexts it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer.
    pub answer: String,
    /// Retrieved supporting contexts, best first.
    pub contexts: Vec<Context>,
    /// Model used for generation.
    pub model: String,
    /// Generation metadata.
    pub meta: GenerationMeta,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            answer: answer.answer,
            contexts: answer.contexts,
            model: answer.model,
            meta: answer.meta,
        }
    }
}

// === Model control panel ===

/// Catalog entry as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub name: String,
    /// Human-friendly description.
    pub description: String,
}

impl From<&ModelSpec> for ModelInfo {
    fn from(model: &ModelSpec) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
        }
    }
}

/// Model list with the active model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Available models in catalog order.
    pub models: Vec<ModelInfo>,
    /// Currently active model.
    pub active_model: String,
}

/// Request to switch the active model.
#[derive(Debug, Clone, Deserialize)]
pub struct SetModelRequest {
    /// Model name to activate.
    pub model: String,
}

/// Result of a successful model switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetModelResponse {
    /// Always `ok`.
    pub status: String,
    /// The now-active model.
    pub active_model: String,
}

// === Errors ===

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error details.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error category.
    #[serde(rename = "type")]
    pub error_type: String,
}

impl ErrorResponse {
    /// Creates an error body.
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
            },
        }
    }
}
