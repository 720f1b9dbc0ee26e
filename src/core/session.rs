// src/core/session.rs — Conversation state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vision::codec::EncodedImage;

/// One conversation. Owned by the `SessionStore`, mutated only under
/// the per-session lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Chronological; never reordered.
    pub turns: Vec<Turn>,
    /// Upload order; append-only between resets.
    pub images: Vec<ImageRef>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            turns: Vec::new(),
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a freshly encoded image and return its sequence number.
    /// Sequence numbers start at 0 and increase without gaps.
    pub fn push_image(&mut self, payload: EncodedImage) -> u64 {
        let seq = self.images.len() as u64;
        self.images.push(ImageRef {
            seq,
            payload,
            uploaded_at: Utc::now(),
        });
        seq
    }

    /// The image a text-only follow-up binds to: always the most
    /// recent upload.
    pub fn latest_image(&self) -> Option<&ImageRef> {
        self.images.last()
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Empty the conversation, keeping the id valid for reuse.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.images.clear();
    }
}

/// One uploaded image, scoped to its session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub seq: u64,
    pub payload: EncodedImage,
    pub uploaded_at: DateTime<Utc>,
}

/// One message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// Which image the analysis behind this turn used. Set on assistant
    /// turns produced by a successful image-backed analysis; guidance
    /// and apology turns carry None.
    pub bound_image_seq: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            bound_image_seq: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>, bound_image_seq: Option<u64>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            bound_image_seq,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}
