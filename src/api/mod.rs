// src/api/mod.rs — HTTP surface over the conversation engine

pub mod auth;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::core::engine::ConversationEngine;
use crate::infra::config::ServerConfig;
pub use types::{TurnRequest, TurnResponse};

/// Base64 image payloads outgrow axum's 2 MB default body cap.
const MAX_BODY_BYTES: usize = 24 * 1024 * 1024;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<ConversationEngine>,
    pub token: Option<String>,
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/v1/sessions", get(handlers::list_sessions))
        .route("/api/v1/sessions/{id}/turns", post(handlers::submit_turn))
        .route("/api/v1/sessions/{id}/clear", post(handlers::clear_session))
        .route(
            "/api/v1/sessions/{id}",
            get(handlers::get_history).delete(handlers::destroy_session),
        )
        .route("/api/v1/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the API server (blocking until shutdown).
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
