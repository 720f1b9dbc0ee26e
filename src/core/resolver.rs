// src/core/resolver.rs — Turn classification and image binding

use crate::core::session::{Session, Turn};
use crate::infra::errors::FoveaError;
use crate::vision::codec::{self, EncodedImage};

/// History text recorded for an upload that came without a caption.
pub const UPLOAD_PLACEHOLDER: &str = "Image uploaded.";

/// Assistant reply when a question arrives before any upload.
pub const NO_IMAGE_GUIDANCE: &str = "Please upload an image for analysis.";

/// What a submitted turn resolved to. `resolve` has already recorded
/// the user's side of the turn in the session by the time it returns;
/// the caller only produces the assistant's side.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Run the backend with `prompt` against `image`, then record the
    /// answer bound to `seq`.
    Analyze {
        prompt: String,
        image: EncodedImage,
        seq: u64,
    },
    /// Text arrived but the session holds no image. Reply with
    /// [`NO_IMAGE_GUIDANCE`].
    NoImage,
    /// Nothing was submitted. Leave the session untouched.
    NoOp,
}

/// Classify one submission and apply its user-side session mutations.
///
/// Whitespace-only text counts as absent. A fresh upload always
/// becomes the binding target for this and later text-only turns; a
/// text-only turn binds to the most recent upload. Encoding failures
/// abort before the session is touched, so a rejected payload leaves
/// no trace in history.
pub fn resolve(
    session: &mut Session,
    persona: &str,
    text: Option<&str>,
    image_bytes: Option<&[u8]>,
) -> Result<Resolution, FoveaError> {
    let text = text.map(str::trim).filter(|t| !t.is_empty());

    match (text, image_bytes) {
        (None, None) => Ok(Resolution::NoOp),

        (text, Some(bytes)) => {
            // Encode before mutating: a bad payload must not leave a
            // phantom turn behind.
            let image = codec::encode(bytes)?;
            let seq = session.push_image(image.clone());
            session.push_turn(Turn::user(text.unwrap_or(UPLOAD_PLACEHOLDER)));
            let prompt = match text {
                Some(t) => format!("{persona} {t}"),
                None => persona.to_string(),
            };
            Ok(Resolution::Analyze { prompt, image, seq })
        }

        (Some(t), None) => {
            session.push_turn(Turn::user(t));
            match session.latest_image() {
                Some(image) => Ok(Resolution::Analyze {
                    prompt: format!("{persona} {t}"),
                    image: image.payload.clone(),
                    seq: image.seq,
                }),
                None => Ok(Resolution::NoImage),
            }
        }
    }
}
