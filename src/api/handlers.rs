// src/api/handlers.rs

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::api::{auth, types::*, ApiState};
use crate::infra::errors::FoveaError;

/// POST /api/v1/sessions/:id/turns — Submit one turn (text and/or a
/// base64 image) and receive the updated history.
pub async fn submit_turn(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_auth(state.token.as_deref(), &headers)?;

    let image_bytes = body
        .image
        .as_deref()
        .map(|encoded| BASE64.decode(encoded))
        .transpose()
        .map_err(|e| bad_request(format!("Image field is not valid base64: {e}")))?;

    let turns = state
        .engine
        .submit_turn(&id, body.text.as_deref(), image_bytes.as_deref())
        .await
        .map_err(|e| match e {
            // Unreadable payloads are the caller's fault; everything
            // else the engine already degraded as far as it could.
            FoveaError::Codec { .. } => bad_request(e.to_string()),
            other => internal_error(other.to_string()),
        })?;

    Ok(Json(TurnResponse {
        session_id: id,
        turns,
    }))
}

/// GET /api/v1/sessions/:id — Current history. Unknown ids read as an
/// empty conversation rather than an error; ids are caller-chosen.
pub async fn get_history(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<TurnResponse>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_auth(state.token.as_deref(), &headers)?;

    let turns = state.engine.history(&id).await;
    Ok(Json(TurnResponse {
        session_id: id,
        turns,
    }))
}

/// GET /api/v1/sessions — Summaries of all live sessions.
pub async fn list_sessions(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<Vec<SessionSummary>>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_auth(state.token.as_deref(), &headers)?;

    let store = state.engine.store();
    let mut summaries = Vec::new();
    for id in store.session_ids().await {
        if let Some(session) = store.get(&id).await {
            let session = session.lock().await;
            summaries.push(SessionSummary {
                session_id: id,
                turn_count: session.turns.len(),
                image_count: session.images.len(),
            });
        }
    }
    Ok(Json(summaries))
}

/// POST /api/v1/sessions/:id/clear — Reset a session's history and
/// images. Idempotent; clearing an unknown id succeeds.
pub async fn clear_session(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_auth(state.token.as_deref(), &headers)?;

    state.engine.clear_session(&id).await;
    Ok(Json(serde_json::json!({
        "session_id": id,
        "status": "cleared",
    })))
}

/// DELETE /api/v1/sessions/:id — Drop a session entirely.
pub async fn destroy_session(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_auth(state.token.as_deref(), &headers)?;

    if state.engine.destroy_session(&id).await {
        Ok(Json(serde_json::json!({
            "session_id": id,
            "status": "destroyed",
        })))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session '{id}' not found"),
            }),
        ))
    }
}

/// GET /api/v1/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

fn internal_error(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error }))
}
