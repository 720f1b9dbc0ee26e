// src/main.rs — fovea entry point

use std::sync::Arc;

use clap::Parser;

use fovea::api::{self, ApiState};
use fovea::cli::{Cli, Commands};
use fovea::core::engine::ConversationEngine;
use fovea::infra::config::Config;
use fovea::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // CLI flags override config
    if let Some(ref model) = cli.model {
        config.vision.model = model.clone();
    }
    if cli.speak {
        config.speech.enabled = true;
    }

    // `speak` needs no vision backend; handle it before engine setup
    if let Some(Commands::Speak { text }) = &cli.command {
        let text = text.join(" ");
        if text.trim().is_empty() {
            anyhow::bail!("Nothing to speak. Usage: fovea speak <text>");
        }
        return fovea::cli::speak::run_speak(&config, text.trim()).await;
    }

    let engine = Arc::new(ConversationEngine::from_config(&config)?);
    let session_id = cli
        .session
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = ApiState {
                engine,
                token: config.server.token.clone(),
            };
            api::start_server(&config.server, state).await
        }
        Some(Commands::Ask { text, image }) => {
            let text = text.join(" ");
            let text = text.trim();
            fovea::cli::ask::run_ask(
                engine,
                &session_id,
                (!text.is_empty()).then_some(text),
                image.as_deref(),
            )
            .await
        }
        // Handled above, before engine construction.
        Some(Commands::Speak { .. }) => unreachable!(),
        Some(Commands::Chat) | None => fovea::cli::chat::run_chat(engine, &config, session_id).await,
    }
}
