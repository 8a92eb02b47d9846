//! Convenience re-exports for common `kalam` types.
//!
//! Meant to be glob-imported by front ends:
//!
//! ```ignore
//! use kalam::prelude::*;
//! ```

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{ChatBackend, ChatCompletion, ChatFuture, ChatRequest, GroqClient, Message};

// ── Pipeline ────────────────────────────────────────────────────────
pub use crate::completion::{CompletionResult, complete};
pub use crate::config::GenerationConfig;
pub use crate::mode::{ExportOptions, GenerationRequest, Mode, ModeProfile, parse_word_limit};
pub use crate::normalize::normalize;
pub use crate::pipeline::{Generation, Generator};
pub use crate::prompt::{PromptSpec, build_prompt};
pub use crate::render::{DisplayBlock, render_plain, segment};
