//! Generate text in one of the writing modes and print it.
//!
//! Reads the API key from the `GROQ_API_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # Freeform piece with a target length
//! kalam --mode ask --words 300 "The future of renewable energy"
//!
//! # Rewrite text piped from a file
//! cat draft.txt | kalam --mode rewrite --stdin
//!
//! # Cold email, printed without block formatting
//! kalam --mode mail --raw "Backend engineer at Acme, Rust and Postgres"
//!
//! # Show the available modes
//! kalam --list-modes
//! ```

use std::io::{self, Read};
use std::process;
use std::sync::Arc;

use clap::Parser;
use kalam::prelude::*;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Generate text in one of the writing modes and print it.
///
/// Reads the API key from the GROQ_API_KEY environment variable.
#[derive(Parser)]
#[command(name = "kalam")]
struct Cli {
    // ── Request ────────────────────────────────────────────────
    /// Topic, job description, or text to rewrite
    prompt: Option<String>,

    /// Writing mode
    #[arg(long, value_enum, default_value_t = Mode::Ask)]
    mode: Mode,

    /// Target length in words (ignored by rewrite and mail)
    #[arg(long)]
    words: Option<String>,

    /// Read input text from stdin
    #[arg(long)]
    stdin: bool,

    // ── Sampling ───────────────────────────────────────────────
    /// Model to use
    #[arg(long, default_value = kalam::DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens in the reply
    #[arg(long, default_value_t = 2048)]
    max_tokens: u32,

    /// Nucleus sampling threshold
    #[arg(long, default_value_t = 1.0)]
    top_p: f32,

    // ── Output ─────────────────────────────────────────────────
    /// Print the display text without block formatting
    #[arg(long)]
    raw: bool,

    /// List the available modes and exit
    #[arg(long)]
    list_modes: bool,
}

fn read_stdin_content() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

fn build_input_text(cli: &Cli) -> Result<String, String> {
    let stdin_text = if cli.stdin {
        Some(read_stdin_content()?)
    } else {
        None
    };

    match (&cli.prompt, stdin_text) {
        (Some(msg), Some(piped)) => Ok(format!("{msg}\n\n{piped}")),
        (Some(msg), None) => Ok(msg.clone()),
        (None, Some(piped)) => Ok(piped),
        (None, None) => Ok(String::new()),
    }
}

fn list_modes() -> String {
    Mode::ALL
        .iter()
        .map(|mode| {
            let profile = mode.profile();
            format!("{:<10}{} - {}", mode.id(), profile.title, profile.subtitle)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn run(cli: &Cli) -> Result<String, String> {
    let word_limit = match &cli.words {
        Some(raw) => parse_word_limit(raw)?,
        None => None,
    };
    if word_limit.is_some() && !cli.mode.supports_word_limit() {
        warn!("{} mode has no length clause; ignoring --words", cli.mode);
    }
    let request = GenerationRequest::new(cli.mode, build_input_text(cli)?, word_limit)?;

    let config = GenerationConfig::default()
        .with_model(&cli.model)
        .with_temperature(cli.temperature)
        .with_max_tokens(cli.max_tokens)
        .with_top_p(cli.top_p);

    let client = GroqClient::from_env()?;
    let generation = Generator::new(Arc::new(client), config)
        .generate(&request)
        .await;

    if cli.raw {
        Ok(generation.display_text)
    } else {
        Ok(render_plain(&generation.blocks))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_modes {
        println!("{}", list_modes());
        return;
    }

    match run(&cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
