// src/core/engine.rs — Turn orchestration

use std::sync::Arc;

use crate::core::resolver::{self, Resolution, NO_IMAGE_GUIDANCE};
use crate::core::session::Turn;
use crate::core::store::SessionStore;
use crate::infra::config::Config;
use crate::infra::errors::FoveaError;
use crate::speech::gtts::GttsSynth;
use crate::speech::SpeechSynth;
use crate::vision::{self, AnalysisRequest, VisionBackend};

/// Assistant reply recorded when the analysis backend fails. The turn
/// stays in history so the conversation survives the outage.
pub const BACKEND_APOLOGY: &str =
    "Sorry, I could not reach the analysis service. Please try again later.";

/// Drives one full turn: resolve what was submitted, call the vision
/// backend when an image is in play, record the reply, and optionally
/// speak it. Shared across the HTTP server and the CLI.
pub struct ConversationEngine {
    store: Arc<SessionStore>,
    backend: Arc<dyn VisionBackend>,
    /// Swappable at runtime so the REPL can toggle spoken replies.
    /// Never held across an await; the Arc is cloned out first.
    speech: std::sync::Mutex<Option<Arc<dyn SpeechSynth>>>,
    model: String,
    persona: String,
}

impl ConversationEngine {
    pub fn new(
        backend: Arc<dyn VisionBackend>,
        model: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            backend,
            speech: std::sync::Mutex::new(None),
            model: model.into(),
            persona: persona.into(),
        }
    }

    pub fn with_speech(self, synth: Arc<dyn SpeechSynth>) -> Self {
        self.set_speech(Some(synth));
        self
    }

    pub fn set_speech(&self, synth: Option<Arc<dyn SpeechSynth>>) {
        if let Ok(mut guard) = self.speech.lock() {
            *guard = synth;
        }
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    pub fn from_config(config: &Config) -> Result<Self, FoveaError> {
        let backend = vision::from_config(&config.vision)?;
        let mut engine = Self::new(
            backend,
            config.vision.model.clone(),
            config.persona.prompt.clone(),
        );
        if config.speech.enabled {
            engine = engine.with_speech(Arc::new(GttsSynth::from_config(&config.speech)));
        }
        Ok(engine)
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Process one submission and return the session's full history,
    /// ending with the new assistant turn (unless nothing was
    /// submitted, in which case history comes back unchanged).
    ///
    /// The per-session lock is held for the whole turn, backend call
    /// and playback included. Concurrent submitters to one session
    /// serialize in arrival order, so each reply lands directly after
    /// its own user turn.
    ///
    /// Only unreadable image payloads surface as errors. Backend
    /// failures become an apology turn and speech failures are logged
    /// and dropped, so a flaky service never wedges the conversation.
    pub async fn submit_turn(
        &self,
        session_id: &str,
        text: Option<&str>,
        image_bytes: Option<&[u8]>,
    ) -> Result<Vec<Turn>, FoveaError> {
        let session = self.store.get_or_create(session_id).await;
        let mut session = session.lock().await;

        let reply = match resolver::resolve(&mut session, &self.persona, text, image_bytes)? {
            Resolution::NoOp => return Ok(session.turns.clone()),
            Resolution::NoImage => {
                tracing::debug!("session {}: question arrived before any image", session_id);
                Turn::assistant(NO_IMAGE_GUIDANCE, None)
            }
            Resolution::Analyze { prompt, image, seq } => {
                let request = AnalysisRequest::new(&self.model, prompt).with_image(image);
                match self.backend.analyze(request).await {
                    Ok(answer) => Turn::assistant(answer, Some(seq)),
                    Err(e) => {
                        tracing::warn!(
                            "session {}: backend '{}' failed: {}",
                            session_id,
                            self.backend.id(),
                            e
                        );
                        Turn::assistant(BACKEND_APOLOGY, None)
                    }
                }
            }
        };

        let spoken = reply.text.clone();
        session.push_turn(reply);

        let synth = self.speech.lock().ok().and_then(|guard| guard.clone());
        if let Some(synth) = synth {
            if let Err(e) = synth.speak(&spoken).await {
                tracing::warn!("speech synthesis failed: {}", e);
            }
        }

        Ok(session.turns.clone())
    }

    /// History snapshot without creating the session.
    pub async fn history(&self, session_id: &str) -> Vec<Turn> {
        match self.store.get(session_id).await {
            Some(session) => session.lock().await.turns.clone(),
            None => Vec::new(),
        }
    }

    pub async fn clear_session(&self, session_id: &str) {
        self.store.clear(session_id).await;
    }

    pub async fn destroy_session(&self, session_id: &str) -> bool {
        self.store.destroy(session_id).await
    }
}
