// src/cli/speak.rs — Direct speech synthesis

use crate::infra::config::Config;
use crate::speech::gtts::GttsSynth;
use crate::speech::SpeechSynth;

/// Synthesize `text` and play it through the configured player.
/// Unlike engine-driven speech, failures here surface as errors.
pub async fn run_speak(config: &Config, text: &str) -> anyhow::Result<()> {
    let synth = GttsSynth::from_config(&config.speech);
    synth.speak(text).await?;
    Ok(())
}
