//! kalam web backend.
//!
//! Serves the writing-assistant API (and optionally the front-end build) on
//! a local port.
//!
//! # Usage
//!
//! ```bash
//! GROQ_API_KEY=gsk-... cargo run -p kalam-web
//! GROQ_API_KEY=gsk-... cargo run -p kalam-web -- --port 8080 --static-dir web/dist
//! ```
//!
//! ## Generating
//!
//! **REST** (`POST /api/generate`):
//! ```json
//! {"mode": "mail", "input": "Backend engineer at Acme", "word_limit": ""}
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use kalam::prelude::*;
use kalam_web::{WebConfig, spawn_web};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// kalam web backend.
#[derive(Parser)]
#[command(about = "HTTP backend for the browser-based writing assistant")]
struct Args {
    /// Port for the web server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Directory with the front-end build to serve.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// LLM model to use.
    #[arg(long, default_value = kalam::DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens per reply.
    #[arg(long, default_value_t = 2048)]
    max_tokens: u32,

    /// Nucleus sampling threshold.
    #[arg(long, default_value_t = 1.0)]
    top_p: f32,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if std::env::var(kalam::API_KEY_ENV).is_err() {
        warn!(
            "{} is not set; every generation will report an error",
            kalam::API_KEY_ENV
        );
    }
    let client = GroqClient::from_env()?;

    let config = GenerationConfig::default()
        .with_model(&args.model)
        .with_temperature(args.temperature)
        .with_max_tokens(args.max_tokens)
        .with_top_p(args.top_p);
    let generator = Generator::new(Arc::new(client), config);

    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(generator, web_config).await?;
    info!("Serving on http://{addr} with model {}", args.model);
    println!("Web UI: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("Shutting down");
    Ok(())
}
