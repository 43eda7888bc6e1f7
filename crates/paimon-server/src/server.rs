//! HTTP server exposing the FAQ pipeline.
//!
//! Routes:
//! - `GET /` health check
//! - `GET /api/status` runtime status and pipeline counters
//! - `POST /api/faq/answer` answer a question
//! - `GET /api/mcp/models` list models and the active one
//! - `POST /api/mcp/models/set` switch the active model

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use malphas::Malphas;
use paimon_core::{Error, Result};

use crate::api::{
    AnswerRequest, AnswerResponse, ErrorResponse, HealthResponse, ModelInfo, ModelsResponse,
    SetModelRequest, SetModelResponse, StatusResponse,
};

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "Paimon FAQ Service";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Allowed CORS origins. `*` allows any origin.
    pub cors_allow_origins: Vec<String>,
    /// Deployment environment name.
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_allow_origins: vec!["*".to_string()],
            environment: "development".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors_allow_origins: Option<Vec<String>>,
    environment: Option<String>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Sets the allowed CORS origins.
    pub fn cors_allow_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_allow_origins = Some(origins);
        self
    }

    /// Sets the environment name.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            addr: self.addr.unwrap_or(defaults.addr),
            cors_allow_origins: self
                .cors_allow_origins
                .unwrap_or(defaults.cors_allow_origins),
            environment: self.environment.unwrap_or(defaults.environment),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The FAQ pipeline.
    pub malphas: Arc<Malphas>,
    /// Server configuration.
    pub config: ServerConfig,
    /// Server start time.
    pub start_time: Instant,
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a server over a pipeline.
    pub fn new(config: ServerConfig, malphas: Arc<Malphas>) -> Self {
        let state = Arc::new(AppState {
            malphas,
            config: config.clone(),
            start_time: Instant::now(),
        });
        Self { config, state }
    }

    /// Creates the router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(health))
            .route("/api/status", get(server_status))
            .route("/api/faq/answer", post(answer))
            .route("/api/mcp/models", get(list_models))
            .route("/api/mcp/models/set", post(set_model))
            .with_state(Arc::clone(&self.state))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&self.config.cors_allow_origins))
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        tracing::info!(
            addr = %self.config.addr,
            environment = %self.config.environment,
            active_model = %self.state.malphas.active_model().name,
            "Starting Paimon server"
        );
        eprintln!(
            "\n\x1b[32m✓\x1b[0m Server listening on http://{}",
            self.config.addr
        );
        eprintln!("  Press Ctrl+C to stop\n");

        let listener = tokio::net::TcpListener::bind(self.config.addr)
            .await
            .map_err(Error::Io)?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::internal(e.to_string()))?;

        tracing::info!("Server shutdown complete");
        eprintln!("\x1b[32m✓\x1b[0m Server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            eprintln!("\n\x1b[33m⚡\x1b[0m Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            eprintln!("\n\x1b[33m⚡\x1b[0m Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Permissive when `origins` contains `*`, otherwise an explicit allow list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

// === Error Response ===

fn error_response(status: StatusCode, message: &str, error_type: &str) -> Response {
    let body = Json(ErrorResponse::new(message, error_type));
    (status, body).into_response()
}

fn pipeline_error(err: &Error) -> Response {
    if let Error::ModelNotFound { model_id } = err {
        tracing::debug!(model = %model_id, "Rejected model switch");
        return error_response(
            StatusCode::BAD_REQUEST,
            "Requested model is not available",
            "model_not_found",
        );
    }

    let (status, error_type) = if err.is_client_error() {
        (StatusCode::BAD_REQUEST, "invalid_request_error")
    } else if err.is_generation_failure() {
        (StatusCode::INTERNAL_SERVER_ERROR, "generation_error")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
    };
    error_response(status, &err.to_string(), error_type)
}

fn rejection_error(rejection: &JsonRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        &rejection.body_text(),
        "invalid_request_error",
    )
}

// === Health ===

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn server_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        environment: state.config.environment.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_model: state.malphas.active_model().name.clone(),
        passages: state.malphas.passage_count(),
        metrics: state.malphas.metrics(),
    })
}

// === FAQ ===

async fn answer(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnswerRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_error(&rejection),
    };

    tracing::debug!(query_len = req.query.len(), top_k = ?req.top_k, "Answer request");

    match state.malphas.answer(&req.query, req.top_k).await {
        Ok(answer) => Json(AnswerResponse::from(answer)).into_response(),
        Err(e) => pipeline_error(&e),
    }
}

// === Model control panel ===

async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.malphas.list_models().iter().map(ModelInfo::from).collect(),
        active_model: state.malphas.active_model().name.clone(),
    })
}

async fn set_model(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SetModelRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_error(&rejection),
    };

    if !state.malphas.set_active_model(&req.model) {
        return pipeline_error(&Error::model_not_found(req.model));
    }

    Json(SetModelResponse {
        status: "ok".to_string(),
        active_model: req.model,
    })
    .into_response()
}
