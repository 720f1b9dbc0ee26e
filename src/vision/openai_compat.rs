// src/vision/openai_compat.rs — Generic OpenAI-compatible vision backend
//
// Speaks the `/chat/completions` dialect with `image_url` content parts.
// Used by: Groq (the default), OpenAI, Together, OpenRouter, and custom
// endpoints.

use async_trait::async_trait;
use std::time::Duration;

use super::{AnalysisRequest, VisionBackend};
use crate::infra::errors::FoveaError;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct OpenAiCompatBackend {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiCompatBackend {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| GROQ_BASE_URL.into()),
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

/// One user message; the image rides along as an `image_url` part
/// carrying a `data:` URL.
fn build_content(request: &AnalysisRequest) -> serde_json::Value {
    match &request.image {
        Some(img) => serde_json::json!([
            {"type": "text", "text": request.prompt},
            {"type": "image_url", "image_url": {"url": img.data_url()}},
        ]),
        None => serde_json::json!(request.prompt),
    }
}

#[async_trait]
impl VisionBackend for OpenAiCompatBackend {
    fn id(&self) -> &str {
        "openai-compat"
    }

    async fn analyze(&self, request: AnalysisRequest) -> Result<String, FoveaError> {
        let body = serde_json::json!({
            "model": request.model,
            "messages": [{"role": "user", "content": build_content(&request)}],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.backend_error(e.to_string(), e.is_timeout()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.backend_error(format!("HTTP {status}: {error_body}"), false));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.backend_error(format!("Failed to parse response: {e}"), false))?;

        Ok(resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}
