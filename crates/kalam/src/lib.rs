//! Writing-assistant pipeline: mode prompts, one-shot completion, reply
//! normalization, and display blocks.
//!
//! `kalam` turns a user's submission (a [`Mode`], some text, an optional
//! word count) into display-ready output in four steps:
//!
//! ```text
//! GenerationRequest ──build_prompt──▶ PromptSpec ──complete──▶ CompletionResult
//!                                                                   │
//!                     Vec<DisplayBlock> ◀──segment── display text ◀─┘ normalize
//! ```
//!
//! Only [`complete`](completion::complete) does I/O. Everything else is a
//! pure function. Failures never propagate past the completion client: a
//! transport error or an unparseable structured reply ends up as display
//! text, so [`Generator::generate`](pipeline::Generator::generate) is
//! infallible.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use kalam::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let client = GroqClient::from_env()?;
//!     let generator = Generator::new(Arc::new(client), GenerationConfig::default());
//!
//!     let request = GenerationRequest::new(Mode::Post, "Work-life balance in tech", Some(150))?;
//!     let generation = generator.generate(&request).await;
//!
//!     println!("{}", render_plain(&generation.blocks));
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`mode`] | [`Mode`], mode profiles, [`GenerationRequest`] |
//! | [`prompt`] | Template registry: [`build_prompt`](prompt::build_prompt) |
//! | [`completion`] | [`complete`](completion::complete) and [`CompletionResult`](completion::CompletionResult) |
//! | [`normalize`] | Structured reply extraction and display text |
//! | [`render`] | Text-to-block segmentation for display |
//! | [`pipeline`] | [`Generator`](pipeline::Generator) composing all of the above |
//! | [`config`] | [`GenerationConfig`](config::GenerationConfig) sampling settings |

pub mod completion;
pub mod config;
pub mod mode;
pub mod normalize;
pub mod pipeline;
pub mod prelude;
pub mod prompt;
pub mod render;

pub use mode::{GenerationRequest, Mode};

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

// ── Constants ──────────────────────────────────────────────────────

pub const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default model for all completions.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body.
///
/// Every field is always serialized, so `stop` goes out as `null` and
/// `stream` as `false`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stop: Option<Vec<String>>,
    pub stream: bool,
}

/// Role of a message in the conversation. Every request carries a single
/// user message.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// A message in the conversation.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`ChatBackend::chat`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatCompletion {
    /// Text of the first choice, if the provider returned one.
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    /// A completion carrying only reply text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// The reply text, or an empty string when the provider sent none.
    pub fn reply_text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Backend capability ─────────────────────────────────────────────

/// Boxed future returned by [`ChatBackend::chat`].
pub type ChatFuture<'a> = Pin<Box<dyn Future<Output = Result<ChatCompletion, String>> + Send + 'a>>;

/// A text-completion provider.
///
/// Anything that can turn a [`ChatRequest`] into a [`ChatCompletion`] can
/// drive the pipeline. Errors are plain strings; the completion client
/// turns them into display text.
///
/// Uses a boxed future so that the trait is dyn-compatible.
pub trait ChatBackend: Send + Sync {
    fn chat<'a>(&'a self, body: &'a ChatRequest) -> ChatFuture<'a>;
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the Groq chat completions API.
pub struct GroqClient {
    client: reqwest::Client,
    api_key: Option<String>,
    url: String,
}

impl GroqClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, String> {
        Self::build(Some(api_key.into()), GROQ_URL)
    }

    /// Create a client from the `GROQ_API_KEY` environment variable.
    ///
    /// A missing key does not fail here. Every request made without one
    /// fails instead, and that failure is shown like any other transport
    /// error.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self::build(api_key, GROQ_URL)
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn build(api_key: Option<String>, url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kalam/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key,
            url: url.to_string(),
        })
    }

    /// Send a chat completion request.
    pub async fn send(&self, body: &ChatRequest) -> Result<ChatCompletion, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| format!("{API_KEY_ENV} is not set"))?;

        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}, top_p={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
            body.top_p,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;

        let elapsed = start.elapsed();
        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            elapsed.as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(format!("Groq API HTTP {status}: {text}"));
        }

        parse_completion(&text)
    }
}

impl ChatBackend for GroqClient {
    fn chat<'a>(&'a self, body: &'a ChatRequest) -> ChatFuture<'a> {
        Box::pin(self.send(body))
    }
}

/// Decode a successful response body into a [`ChatCompletion`].
fn parse_completion(text: &str) -> Result<ChatCompletion, String> {
    let parsed: RawChatResponse =
        serde_json::from_str(text).map_err(|e| format!("failed to parse response: {e}"))?;

    if let Some(err) = parsed.error {
        return Err(format!("Groq API error: {}", err.message));
    }

    if let Some(ref usage) = parsed.usage {
        debug!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
            usage.total_tokens.unwrap_or(0),
        );
    }

    match parsed.choices.and_then(|c| c.into_iter().next()) {
        Some(c) => {
            debug!(
                "LLM output: {} chars",
                c.message.content.as_ref().map_or(0, |s| s.len())
            );
            Ok(ChatCompletion {
                content: c.message.content,
                usage: parsed.usage,
                finish_reason: c.finish_reason,
            })
        }
        None => {
            debug!("LLM output: empty (no choices)");
            Ok(ChatCompletion {
                content: None,
                usage: parsed.usage,
                finish_reason: None,
            })
        }
    }
}
