//! Writing modes and the per-submission request.
//!
//! A [`Mode`] selects which prompt template the registry renders and whether
//! the reply is expected to be structured. Each mode also carries a static
//! [`ModeProfile`] with the copy a front end shows around the input box.

use serde::{Deserialize, Serialize};

/// One of the five writing tasks.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Freeform writing on a topic.
    Ask,
    /// Rewrite pasted text.
    Rewrite,
    /// Cold email for a job description. The only structured mode.
    Mail,
    /// Research article on a topic.
    Research,
    /// Social post on a topic.
    Post,
}

impl Mode {
    /// All modes in display order.
    pub const ALL: [Mode; 5] = [
        Mode::Ask,
        Mode::Rewrite,
        Mode::Mail,
        Mode::Research,
        Mode::Post,
    ];

    /// Lowercase identifier used on the command line and over the wire.
    pub fn id(self) -> &'static str {
        match self {
            Mode::Ask => "ask",
            Mode::Rewrite => "rewrite",
            Mode::Mail => "mail",
            Mode::Research => "research",
            Mode::Post => "post",
        }
    }

    /// Whether the reply for this mode must be a JSON object.
    pub fn expects_structured_reply(self) -> bool {
        matches!(self, Mode::Mail)
    }

    /// Whether the template for this mode has a word-limit clause.
    pub fn supports_word_limit(self) -> bool {
        matches!(self, Mode::Ask | Mode::Research | Mode::Post)
    }

    /// Presentation metadata for this mode.
    pub fn profile(self) -> ModeProfile {
        match self {
            Mode::Ask => ModeProfile {
                title: "Ask Kalam",
                subtitle: "Ready to turn your ideas into compelling text?",
                placeholder: "e.g., An article about the future of renewable energy...",
                show_word_limit: true,
                export: ExportOptions::NONE,
            },
            Mode::Rewrite => ModeProfile {
                title: "Kalam Rewrite",
                subtitle: "Paste your content to get a plagiarism-free, human-like version.",
                placeholder: "Paste your text here...",
                show_word_limit: true,
                export: ExportOptions {
                    pdf: true,
                    txt: true,
                },
            },
            Mode::Mail => ModeProfile {
                title: "Kalam Mail",
                subtitle: "Generate a short, crisp, and professional cold mail.",
                placeholder: "Paste the job description or describe the role you're applying for...",
                show_word_limit: true,
                export: ExportOptions::NONE,
            },
            Mode::Research => ModeProfile {
                title: "Kalam Research",
                subtitle: "What's your research topic? Get a curated article.",
                placeholder: "e.g., The impact of quantum computing on cryptography...",
                show_word_limit: true,
                export: ExportOptions::NONE,
            },
            Mode::Post => ModeProfile {
                title: "Kalam Post",
                subtitle: "What's your post about? Get a well-curated LinkedIn post.",
                placeholder: "e.g., The importance of work-life balance in the tech industry...",
                show_word_limit: true,
                export: ExportOptions::NONE,
            },
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Copy and toggles a front end shows for a mode.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeProfile {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub placeholder: &'static str,
    pub show_word_limit: bool,
    pub export: ExportOptions,
}

/// Which export actions the output pane offers. Export itself happens
/// outside this crate.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub pdf: bool,
    pub txt: bool,
}

impl ExportOptions {
    pub const NONE: ExportOptions = ExportOptions {
        pdf: false,
        txt: false,
    };
}

/// Parse a word-limit field as typed into a form.
///
/// Blank input means "no limit". Zero is treated the same way so the
/// template never renders a "0 words" clause.
pub fn parse_word_limit(raw: &str) -> Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let n: u32 = trimmed
        .parse()
        .map_err(|_| format!("invalid word limit '{trimmed}': expected a positive integer"))?;
    Ok((n > 0).then_some(n))
}

/// A single submission: the mode, the user's text, and an optional target
/// length in words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub mode: Mode,
    pub input_text: String,
    pub word_limit: Option<u32>,
}

impl GenerationRequest {
    /// Build a request, refusing blank input.
    ///
    /// The input is kept verbatim (including surrounding whitespace); only
    /// the emptiness check trims it.
    pub fn new(
        mode: Mode,
        input_text: impl Into<String>,
        word_limit: Option<u32>,
    ) -> Result<Self, String> {
        let input_text = input_text.into();
        if input_text.trim().is_empty() {
            return Err("input text is empty".to_string());
        }
        Ok(Self {
            mode,
            input_text,
            word_limit: word_limit.filter(|&n| n > 0),
        })
    }
}
