// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::session::Turn;

/// Request body for submitting a turn. Both fields are optional; an
/// empty body is a valid no-op submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Raw image bytes, base64-encoded for transport.
    #[serde(default)]
    pub image: Option<String>,
}

/// Response for a processed turn: the session's full history with the
/// newest turn last.
#[derive(Debug, Serialize, Deserialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub turns: Vec<Turn>,
}

/// One row in the sessions listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub turn_count: usize,
    pub image_count: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
