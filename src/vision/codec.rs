// src/vision/codec.rs — Image payload encoding

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::FoveaError;

/// A transport-safe image payload: base64 text plus the sniffed MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub base64: String,
    pub mime: String,
}

impl EncodedImage {
    /// Renders as an OpenAI-style `data:` URL for chat/completions
    /// image_url content parts.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Encode raw image bytes. Deterministic; rejects an empty payload,
/// which is the unreadable-input boundary for the whole turn.
pub fn encode(bytes: &[u8]) -> Result<EncodedImage, FoveaError> {
    if bytes.is_empty() {
        return Err(FoveaError::Codec {
            reason: "empty image payload".into(),
        });
    }
    Ok(EncodedImage {
        base64: BASE64.encode(bytes),
        mime: sniff_mime(bytes).to_string(),
    })
}

/// Read and encode an image file (the CLI upload path).
pub async fn encode_file(path: &Path) -> Result<EncodedImage, FoveaError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| FoveaError::Codec {
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    encode(&bytes)
}

/// Detect the content type from magic bytes. Unknown formats fall back
/// to JPEG, which vision endpoints accept for any common photo upload.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
