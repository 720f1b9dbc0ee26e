// src/vision/mod.rs — Vision backend layer

pub mod codec;
pub mod ollama;
pub mod openai_compat;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::infra::config::VisionConfig;
use crate::infra::errors::FoveaError;
use codec::EncodedImage;

/// Core trait that all vision backends implement. One call per turn:
/// text in, text out, optionally one image alongside.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    fn id(&self) -> &str;

    async fn analyze(&self, request: AnalysisRequest) -> Result<String, FoveaError>;
}

impl std::fmt::Debug for dyn VisionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionBackend")
            .field("id", &self.id())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub model: String,
    pub prompt: String,
    pub image: Option<EncodedImage>,
}

impl AnalysisRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: EncodedImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Build a backend from the `[vision]` config section.
pub fn from_config(cfg: &VisionConfig) -> Result<Arc<dyn VisionBackend>, FoveaError> {
    let timeout = Duration::from_secs(cfg.request_timeout_secs);
    match cfg.backend.as_str() {
        "openai-compat" => {
            let api_key = std::env::var(&cfg.api_key_env).unwrap_or_default();
            if api_key.is_empty() {
                tracing::warn!(
                    "No API key in ${}; requests to the vision backend will be unauthenticated",
                    cfg.api_key_env
                );
            }
            Ok(Arc::new(openai_compat::OpenAiCompatBackend::new(
                api_key,
                cfg.base_url.clone(),
                timeout,
            )))
        }
        "ollama" => Ok(Arc::new(ollama::OllamaBackend::new(
            cfg.base_url.clone(),
            timeout,
        ))),
        other => Err(FoveaError::Config(format!(
            "unknown vision backend '{other}' (expected \"openai-compat\" or \"ollama\")"
        ))),
    }
}
