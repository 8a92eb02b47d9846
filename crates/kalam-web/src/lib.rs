//! HTTP backend for the browser-based kalam writing assistant.
//!
//! `kalam-web` exposes the [`kalam`] pipeline over a small REST API and can
//! serve the static front-end build from the same origin.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use kalam::prelude::*;
//! use kalam_web::{WebConfig, spawn_web};
//!
//! let generator = Generator::new(Arc::new(GroqClient::from_env()?), GenerationConfig::default());
//! let addr = spawn_web(generator, WebConfig::default()).await?;
//! println!("Web UI: http://{addr}");
//! ```
//!
//! # Endpoints
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/modes` | Modes with title, subtitle, placeholder and export flags |
//! | `GET /api/state` | `{ loading, last }` for the output pane |
//! | `POST /api/generate` | `{ mode, input, word_limit? }` → `{ mode, display_text, blocks, failed }` |
//!
//! Only one generation runs at a time; a second submission while one is in
//! flight gets `409 Conflict`.

mod api;
mod server;
pub mod session;

pub use api::{ErrorBody, GenerateBody, ModeInfo};
pub use session::SessionState;

use std::net::SocketAddr;
use std::path::PathBuf;

use kalam::pipeline::Generator;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory with the front-end production build.
    ///
    /// If `None`, only the API is served and the front end runs separately.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(generator: Generator, config: WebConfig) -> Result<SocketAddr, String> {
    let router = server::build_router(generator, Default::default(), config.static_dir);
    server::start_server(router, config.bind_addr).await
}
