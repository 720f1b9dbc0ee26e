// src/cli/ask.rs — One-shot turn

use std::sync::Arc;

use crate::core::engine::ConversationEngine;
use crate::core::session::Role;

/// Submit a single turn and print the reply.
pub async fn run_ask(
    engine: Arc<ConversationEngine>,
    session_id: &str,
    text: Option<&str>,
    image_path: Option<&str>,
) -> anyhow::Result<()> {
    let image_bytes = match image_path {
        Some(path) => Some(
            tokio::fs::read(path)
                .await
                .map_err(|e| anyhow::anyhow!("Could not read image {path}: {e}"))?,
        ),
        None => None,
    };

    if text.is_none() && image_bytes.is_none() {
        anyhow::bail!("Nothing to ask. Provide text, --image <path>, or both.");
    }

    let turns = engine
        .submit_turn(session_id, text, image_bytes.as_deref())
        .await?;

    if let Some(turn) = turns.iter().rev().find(|t| t.role == Role::Assistant) {
        println!("{}", turn.text);
    }
    Ok(())
}
