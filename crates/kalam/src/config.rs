//! Sampling settings for the completion request.
//!
//! [`GenerationConfig`] captures the model and sampling parameters sent with
//! every request and converts a prompt into a wire-ready
//! [`ChatRequest`] via [`build_request`](GenerationConfig::build_request).

use crate::{ChatRequest, DEFAULT_MODEL, Message};

/// Model and sampling parameters for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Model identifier. Default: `"llama-3.3-70b-versatile"`.
    pub model: String,
    /// Sampling temperature. Default: `0.7`.
    pub temperature: f32,
    /// Maximum tokens in the reply. Default: `2048`.
    pub max_tokens: u32,
    /// Nucleus sampling threshold. Default: `1.0`.
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 1.0,
        }
    }
}

impl GenerationConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Wrap `content` as the single user message of a non-streaming request.
    pub fn build_request(&self, content: impl Into<String>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(content)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            stop: None,
            stream: false,
        }
    }
}
