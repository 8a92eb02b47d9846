//! One-shot completion with errors folded into text.
//!
//! [`complete`] issues exactly one request to a [`ChatBackend`]. There is no
//! retry, streaming, or cancellation. Whatever goes wrong (transport, auth,
//! provider, or a structured reply that is not JSON) comes back as
//! [`CompletionResult::Failed`] with an `"Error: "`-prefixed message that can
//! be shown in place of generated text.

use tracing::{debug, warn};

use crate::ChatBackend;
use crate::config::GenerationConfig;

/// Appended to the outgoing content when the reply must be JSON.
pub const JSON_REINFORCEMENT: &str =
    "\nRespond only with a JSON object that has 'subject' and 'body' fields.";

/// Reported when a structured reply does not parse.
pub const INVALID_JSON_MESSAGE: &str = "Failed to generate valid JSON response";

/// Outcome of one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// The raw reply text.
    Text(String),
    /// A displayable failure message.
    Failed(String),
}

impl CompletionResult {
    /// The text to show for this result, whichever variant it is.
    pub fn as_str(&self) -> &str {
        match self {
            CompletionResult::Text(text) | CompletionResult::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CompletionResult::Failed(_))
    }
}

/// Send `prompt_text` to the backend and return its reply.
///
/// When `expects_structured_reply` is set, a JSON-only instruction is
/// appended to the outgoing content and the reply must parse as JSON. The
/// raw reply is discarded when it does not.
pub async fn complete(
    backend: &dyn ChatBackend,
    config: &GenerationConfig,
    prompt_text: &str,
    expects_structured_reply: bool,
) -> CompletionResult {
    match request_reply(backend, config, prompt_text, expects_structured_reply).await {
        Ok(text) => CompletionResult::Text(text),
        Err(e) => {
            warn!("Completion failed: {e}");
            CompletionResult::Failed(format!("Error: {e}"))
        }
    }
}

async fn request_reply(
    backend: &dyn ChatBackend,
    config: &GenerationConfig,
    prompt_text: &str,
    expects_structured_reply: bool,
) -> Result<String, String> {
    let content = if expects_structured_reply {
        format!("{prompt_text}{JSON_REINFORCEMENT}")
    } else {
        prompt_text.to_string()
    };

    let body = config.build_request(content);
    let completion = backend.chat(&body).await?;
    let reply = completion.reply_text().to_string();

    if expects_structured_reply
        && let Err(e) = serde_json::from_str::<serde_json::Value>(&reply)
    {
        debug!("Structured reply is not JSON: {e}");
        return Err(INVALID_JSON_MESSAGE.to_string());
    }

    Ok(reply)
}
