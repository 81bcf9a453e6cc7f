//! `aula serve` — HTTP API for the web client.
//!
//! Routes are mounted twice, under `/simulate` and `/simulador`, so both the
//! current client and older builds keep working.
//!
//! Startup sequence:
//! 1. Build one provider adapter and share it between both services
//! 2. Build the router (trace + CORS layers)
//! 3. Bind and serve until Ctrl+C / SIGTERM

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use aula_core::config::Config;
use aula_core::types::{ChatResult, Failure, FailureKind, RagResult};
use aula_core::utils::timestamp;
use aula_providers::{adapter_from_config, ProviderAdapter};
use aula_tutor::{ConversationService, LookupService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub conversation: Arc<ConversationService>,
    pub lookup: Arc<LookupService>,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let adapter = adapter_from_config(&config.provider);
        Self::with_adapter(config, adapter)
    }

    /// Build the services around an existing adapter.
    pub fn with_adapter(config: Config, adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            conversation: Arc::new(ConversationService::from_config(&config, adapter.clone())),
            lookup: Arc::new(LookupService::from_config(&config, adapter)),
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct RagRequest {
    pub question: String,
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors_origins);

    let simulator = Router::new()
        .route("/chat", post(chat))
        .route("/rag", post(rag));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/simulate", simulator.clone())
        .nest("/simulador", simulator)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// All origins when none are configured, otherwise only the listed ones.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                warn!(origin = %origin, "invalid CORS origin, skipping");
                None
            })
        })
        .collect();

    if parsed.is_empty() {
        warn!("no valid CORS origins configured, allowing all");
        return CorsLayer::permissive();
    }

    info!(count = parsed.len(), "CORS restricted to configured origins");
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("Bienvenido a {}", state.config.app.name),
        "endpoints": {
            "chat": "/simulate/chat",
            "rag": "/simulate/rag",
            "health": "/health"
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "app_name": state.config.app.name,
        "model": state.conversation.model(),
        "api_configured": state.conversation.is_configured(),
        "timestamp": timestamp(),
    }))
}

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    match state.conversation.converse(&req.prompt).await {
        ChatResult::Failure(failure) => failure_response(failure),
        reply => Json(reply).into_response(),
    }
}

async fn rag(State(state): State<AppState>, Json(req): Json<RagRequest>) -> Response {
    match state.lookup.lookup(&req.question).await {
        RagResult::Failure(failure) => failure_response(failure),
        answer => Json(answer).into_response(),
    }
}

fn failure_response(failure: Failure) -> Response {
    let status = match failure.kind {
        FailureKind::Validation => StatusCode::BAD_REQUEST,
        FailureKind::Provider => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "detail": failure.error }))).into_response()
}

// ─────────────────────────────────────────────
// Serve
// ─────────────────────────────────────────────

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.server.bind_address();
    let app = create_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
