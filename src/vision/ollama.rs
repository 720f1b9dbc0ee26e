// src/vision/ollama.rs — Ollama local vision backend

use async_trait::async_trait;
use std::time::Duration;

use super::{AnalysisRequest, VisionBackend};
use crate::infra::errors::FoveaError;

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

pub struct OllamaBackend {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaBackend {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| OLLAMA_BASE_URL.into()),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn backend_error(&self, message: String, timeout: bool) -> FoveaError {
        FoveaError::Backend {
            backend: self.id().into(),
            message,
            timeout,
        }
    }
}

/// Ollama's `/api/chat` takes the raw base64 payload in the message's
/// `images` array, no data: URL wrapper.
fn build_message(request: &AnalysisRequest) -> serde_json::Value {
    let mut message = serde_json::json!({
        "role": "user",
        "content": request.prompt,
    });
    if let Some(ref img) = request.image {
        message["images"] = serde_json::json!([img.base64]);
    }
    message
}

#[async_trait]
impl VisionBackend for OllamaBackend {
    fn id(&self) -> &str {
        "ollama"
    }

    async fn analyze(&self, request: AnalysisRequest) -> Result<String, FoveaError> {
        let body = serde_json::json!({
            "model": request.model,
            "messages": [build_message(&request)],
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.backend_error(e.to_string(), e.is_timeout()))?;

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.backend_error(format!("HTTP error: {error_body}"), false));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.backend_error(format!("Failed to parse response: {e}"), false))?;

        Ok(resp["message"]["content"].as_str().unwrap_or("").to_string())
    }
}
