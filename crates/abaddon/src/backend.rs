//! Generation backend abstraction.

use async_trait::async_trait;
use paimon_core::{GenerationRequest, Result};

/// Trait defining an answer-generation backend.
///
/// Any implementation must return an answer that references the query, is
/// shaped by the contexts when there are any, and differs between styles.
/// A backend that cannot answer (remote model down, quota exhausted) returns
/// [`paimon_core::Error::Generation`] rather than an empty answer.
///
/// Cancellation and timeouts for backends that do I/O belong here.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produces an answer for the request.
    async fn produce(&self, request: &GenerationRequest) -> Result<String>;

    /// Returns the backend name.
    fn name(&self) -> &str;

    /// Returns true if the backend is ready to serve requests.
    fn is_ready(&self) -> bool {
        true
    }
}
