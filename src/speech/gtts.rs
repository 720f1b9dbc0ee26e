// src/speech/gtts.rs — Google Translate TTS backend
//
// Fetches one MP3 per text chunk and byte-concatenates them: MP3 frame
// streams concatenate cleanly, so the result plays as a single
// continuous utterance without an audio-decoding dependency.

use async_trait::async_trait;
use std::time::Duration;

use super::{chunk_text, player, SpeechSynth};
use crate::infra::config::SpeechConfig;
use crate::infra::errors::FoveaError;

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Per-chunk fetch timeout. Speech is best-effort; a hung request must
/// not stall the conversation for the full analysis timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GttsSynth {
    language: String,
    chunk_chars: usize,
    player_override: Option<String>,
    client: reqwest::Client,
}

impl GttsSynth {
    pub fn new(language: impl Into<String>, chunk_chars: usize) -> Self {
        Self {
            language: language.into(),
            chunk_chars,
            player_override: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &SpeechConfig) -> Self {
        Self {
            language: cfg.language.clone(),
            chunk_chars: cfg.chunk_chars,
            player_override: cfg.player.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_chunk(&self, chunk: &str) -> Result<Vec<u8>, FoveaError> {
        let response = self
            .client
            .get(TTS_ENDPOINT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", chunk),
            ])
            .header(
                "User-Agent",
                format!("fovea/{}", env!("CARGO_PKG_VERSION")),
            )
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| FoveaError::Speech(format!("TTS fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(FoveaError::Speech(format!(
                "TTS endpoint returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FoveaError::Speech(format!("TTS body read failed: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynth for GttsSynth {
    fn id(&self) -> &str {
        "gtts"
    }

    async fn speak(&self, text: &str) -> Result<(), FoveaError> {
        let chunks = chunk_text(text, self.chunk_chars);
        if chunks.is_empty() {
            return Ok(());
        }

        tracing::debug!("Synthesizing {} chunk(s) of speech", chunks.len());
        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.fetch_chunk(chunk).await?);
        }

        let file = tempfile::Builder::new()
            .prefix("fovea-tts-")
            .suffix(".mp3")
            .tempfile()
            .map_err(|e| FoveaError::Speech(format!("cannot create scratch file: {e}")))?;
        tokio::fs::write(file.path(), &audio)
            .await
            .map_err(|e| FoveaError::Speech(format!("cannot write scratch file: {e}")))?;

        player::play_file(file.path(), self.player_override.as_deref()).await
    }
}
