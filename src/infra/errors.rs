// src/infra/errors.rs — Error types for fovea

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoveaError {
    // Image input errors (fatal to the turn that carried the image)
    #[error("Unreadable image: {reason}")]
    Codec { reason: String },

    // Vision backend errors (recovered into an apology reply)
    #[error("Backend '{backend}' error: {message}")]
    Backend {
        backend: String,
        message: String,
        timeout: bool,
    },

    // Speech errors (logged and swallowed by the engine)
    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoveaError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FoveaError::Backend { timeout: true, .. })
    }
}
