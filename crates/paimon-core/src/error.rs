//! Error types for the Paimon pipeline.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the Paimon pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied input the pipeline refuses to process.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// Model was not found in the catalog.
    #[error("Model not found: {model_id}")]
    ModelNotFound {
        /// The requested model name.
        model_id: String,
    },

    /// The generation backend could not produce an answer.
    #[error("Generation failed ({backend}): {message}")]
    Generation {
        /// Backend name.
        backend: String,
        /// Error message.
        message: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Returns `true` if the caller caused this error and retrying the same
    /// request will fail the same way.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::ModelNotFound { .. }
        )
    }

    /// Returns `true` if this error came from the generation backend.
    #[must_use]
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }

    /// Creates an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a model-not-found error for the given model name.
    #[must_use]
    pub fn model_not_found(model_id: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model_id: model_id.into(),
        }
    }

    /// Creates a generation error with the given backend name and message.
    #[must_use]
    pub fn generation(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::invalid_input("empty query").is_client_error());
        assert!(Error::model_not_found("gpt-huge").is_client_error());
        assert!(!Error::generation("template", "offline").is_client_error());
        assert!(!Error::internal("boom").is_client_error());
    }

    #[test]
    fn test_generation_failure_is_distinct() {
        let err = Error::generation("remote", "connection refused");
        assert!(err.is_generation_failure());
        assert_eq!(
            err.to_string(),
            "Generation failed (remote): connection refused"
        );
        assert!(!Error::invalid_input("x").is_generation_failure());
    }

    #[test]
    fn test_model_not_found_display() {
        let err = Error::model_not_found("gpt-huge");
        assert!(matches!(&err, Error::ModelNotFound { model_id } if model_id == "gpt-huge"));
        assert_eq!(err.to_string(), "Model not found: gpt-huge");
    }
}
