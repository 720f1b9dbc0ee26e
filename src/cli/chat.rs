// src/cli/chat.rs — Interactive REPL

use std::sync::Arc;

use crate::core::engine::ConversationEngine;
use crate::core::session::{Role, Turn};
use crate::infra::config::Config;
use crate::speech::gtts::GttsSynth;

/// Mutable session state that slash commands can modify.
struct ChatState {
    session_id: String,
    turns_sent: u32,
}

/// Run the interactive chat REPL.
pub async fn run_chat(
    engine: Arc<ConversationEngine>,
    config: &Config,
    session_id: String,
) -> anyhow::Result<()> {
    eprintln!(
        "fovea v{} | {} | session {} | speech {}\nAsk about an image, /image <path> to upload, /help for commands.\n",
        env!("CARGO_PKG_VERSION"),
        engine.model(),
        session_id,
        if engine.speech_enabled() { "on" } else { "off" },
    );

    let mut state = ChatState {
        session_id,
        turns_sent: 0,
    };

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        // Handle quit
        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        // Handle slash commands
        if trimmed.starts_with('/') {
            handle_slash_command(trimmed, &mut state, &engine, config).await;
            continue;
        }

        // Empty input
        if trimmed.is_empty() {
            continue;
        }

        match engine
            .submit_turn(&state.session_id, Some(trimmed), None)
            .await
        {
            Ok(turns) => {
                state.turns_sent += 1;
                print_reply(&turns);
            }
            Err(e) => eprintln!("[error] {}", e),
        }
    }

    eprintln!("\nSession total: {} turn(s)", state.turns_sent);
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

/// Print the assistant's side of the newest exchange.
fn print_reply(turns: &[Turn]) {
    if let Some(turn) = turns.iter().rev().find(|t| t.role == Role::Assistant) {
        println!("{}", turn.text);
    }
}

/// Truncate long turn text for the history listing.
fn preview(text: &str) -> String {
    const MAX: usize = 96;
    if text.len() <= MAX {
        return text.to_string();
    }
    let mut end = MAX - 3;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

async fn handle_slash_command(
    input: &str,
    state: &mut ChatState,
    engine: &Arc<ConversationEngine>,
    config: &Config,
) {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/image" => {
            if arg.is_empty() {
                eprintln!("  Usage: /image <path> [question]");
                return;
            }
            let (path, question) = match arg.split_once(' ') {
                Some((p, q)) => (p, Some(q.trim()).filter(|q| !q.is_empty())),
                None => (arg, None),
            };
            let bytes = match tokio::fs::read(path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("  Could not read {}: {}", path, e);
                    return;
                }
            };
            match engine
                .submit_turn(&state.session_id, question, Some(&bytes))
                .await
            {
                Ok(turns) => {
                    state.turns_sent += 1;
                    print_reply(&turns);
                }
                Err(e) => eprintln!("[error] {}", e),
            }
        }

        "/history" => {
            let turns = engine.history(&state.session_id).await;
            if turns.is_empty() {
                eprintln!("  No turns in this session yet.");
            } else {
                eprintln!("  Session history ({} turn(s)):", turns.len());
                for turn in &turns {
                    let who = match turn.role {
                        Role::User => "you",
                        Role::Assistant => "fovea",
                    };
                    let marker = turn
                        .bound_image_seq
                        .map(|seq| format!(" [image #{seq}]"))
                        .unwrap_or_default();
                    eprintln!("  {:>6}: {}{}", who, preview(&turn.text), marker);
                }
            }
        }

        "/clear" => {
            engine.clear_session(&state.session_id).await;
            eprintln!("  Session cleared.");
        }

        "/speak" => match arg {
            "on" => {
                engine.set_speech(Some(Arc::new(GttsSynth::from_config(&config.speech))));
                eprintln!("  Speech on.");
            }
            "off" => {
                engine.set_speech(None);
                eprintln!("  Speech off.");
            }
            _ => {
                eprintln!(
                    "  Speech is {}.",
                    if engine.speech_enabled() { "on" } else { "off" }
                );
                eprintln!("  Usage: /speak on|off");
            }
        },

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /image <path> [question]  Upload an image, optionally with a question");
            eprintln!("  /history                  Show this session's turns");
            eprintln!("  /clear                    Forget this session's turns and images");
            eprintln!("  /speak on|off             Toggle spoken replies");
            eprintln!("  /help                     Show this help");
            eprintln!("  /quit, quit, exit         End session");
        }

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
}
