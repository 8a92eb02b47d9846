//! End-to-end generation: prompt, completion, normalization, segmentation.
//!
//! [`Generator`] holds the only long-lived pieces (the backend and the
//! sampling config). Each call to [`generate`](Generator::generate) builds
//! fresh values and returns them; nothing carries over between submissions.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::ChatBackend;
use crate::completion::complete;
use crate::config::GenerationConfig;
use crate::mode::{GenerationRequest, Mode};
use crate::normalize::normalize;
use crate::prompt::build_prompt;
use crate::render::{DisplayBlock, segment};

/// Display-ready output of one submission.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub mode: Mode,
    /// Text for copy/export and the plain view.
    pub display_text: String,
    /// `display_text` segmented for the structured view.
    pub blocks: Vec<DisplayBlock>,
    /// Whether the completion itself failed. Parse failures in the
    /// structured mode are reported through `display_text` only.
    pub failed: bool,
}

/// Runs submissions against a completion backend.
#[derive(Clone)]
pub struct Generator {
    backend: Arc<dyn ChatBackend>,
    config: GenerationConfig,
}

impl Generator {
    pub fn new(backend: Arc<dyn ChatBackend>, config: GenerationConfig) -> Self {
        Self { backend, config }
    }

    /// Run one submission. Never fails: every error path ends as display
    /// text.
    pub async fn generate(&self, request: &GenerationRequest) -> Generation {
        let start = Instant::now();
        let spec = build_prompt(request);
        debug!(
            "Prompt for {}: {} chars, structured={}",
            request.mode,
            spec.prompt_text.len(),
            spec.expects_structured_reply
        );

        let result = complete(
            self.backend.as_ref(),
            &self.config,
            &spec.prompt_text,
            spec.expects_structured_reply,
        )
        .await;
        let failed = result.is_failed();

        let display_text = normalize(&result, spec.expects_structured_reply);
        let blocks = segment(&display_text);

        info!(
            "Generated {} output: {} chars, {} block(s), failed={} in {:.1}s",
            request.mode,
            display_text.len(),
            blocks.len(),
            failed,
            start.elapsed().as_secs_f64()
        );

        Generation {
            mode: request.mode,
            display_text,
            blocks,
            failed,
        }
    }
}
