// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vision: VisionConfig,

    #[serde(default)]
    pub persona: PersonaConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// `[vision]` — which backend analyzes (prompt, image) pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Backend kind: "openai-compat" (Groq, OpenAI, Together, ...) or "ollama".
    pub backend: String,
    /// Endpoint base URL. Unset means the backend's default
    /// (Groq for openai-compat, localhost:11434 for ollama).
    pub base_url: Option<String>,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub request_timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            backend: "openai-compat".into(),
            base_url: None,
            model: "llama-3.2-11b-vision-preview".into(),
            api_key_env: "GROQ_API_KEY".into(),
            request_timeout_secs: 120,
        }
    }
}

/// `[persona]` — instruction text prefixed to every analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub prompt: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            prompt: "You are a helpful visual assistant. Answer the user's question \
                     about what you see. Respond naturally in one short paragraph, \
                     speaking directly to the user, without referencing the image \
                     explicitly."
                .into(),
        }
    }
}

/// `[speech]` — spoken replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// Language code passed to the synthesis backend.
    pub language: String,
    /// Per-request character limit of the synthesis backend.
    pub chunk_chars: usize,
    /// Audio player binary. Unset means platform autodetection
    /// (ffplay / afplay / PowerShell).
    pub player: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            language: "en".into(),
            chunk_chars: 200,
            player: None,
        }
    }
}

/// `[server]` — the HTTP API surface (`fovea serve`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional bearer token required on every route except /health.
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 7171,
            token: None,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
