// src/cli/mod.rs — CLI definition (clap derive)

pub mod ask;
pub mod chat;
pub mod speak;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fovea",
    about = "Image-grounded chat with spoken replies",
    version
)]
pub struct Cli {
    /// Vision model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Speak assistant replies aloud
    #[arg(long)]
    pub speak: bool,

    /// Session id to resume (defaults to a fresh random id)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session (default when no subcommand given)
    Chat,
    /// One-shot question, optionally with an image
    Ask {
        /// Question text
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
        /// Image file to upload alongside the question
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Run the HTTP API server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Synthesize the given text and play it
    Speak {
        /// Text to speak
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}
