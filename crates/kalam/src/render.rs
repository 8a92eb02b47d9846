//! Best-effort segmentation of plain text into display blocks.
//!
//! [`segment`] splits text on blank lines and classifies each block as a
//! bullet list, a heading (optionally followed by body lines), or a
//! paragraph. It is a heuristic formatter, not a Markdown parser: no nested
//! lists, no inline markup, and no input makes it fail. The result is
//! recomputed on every render and never fed back into a request.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// Whitespace as browsers define it for `\s` and `trim()`: Unicode
// White_Space plus U+FEFF, minus U+0085.
const SPACE: &str = r"[\s\x{FEFF}--\x{85}]";

static BLOCK_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\n{SPACE}*\n")).expect("block split regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^[-*]{SPACE}+")).expect("bullet regex"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"^[A-Z][-A-Za-z0-9'"{SPACE}]{{0,59}}$"#)).expect("heading regex")
});

fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Headings must be shorter than this many characters unless they end in `:`.
const HEADING_MAX_CHARS: usize = 60;

/// One visual unit of output.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayBlock {
    /// A block shown as-is, line breaks preserved.
    Paragraph { text: String },
    /// A heading, with the lines that followed it in the same block.
    Heading { text: String, body: Option<String> },
    /// A bullet list with markers stripped.
    List { items: Vec<String> },
}

/// Split `text` into display blocks.
pub fn segment(text: &str) -> Vec<DisplayBlock> {
    BLOCK_SPLIT
        .split(text)
        .filter(|block| !block.is_empty())
        .filter_map(classify)
        .collect()
}

fn classify(block: &str) -> Option<DisplayBlock> {
    let lines: Vec<&str> = block
        .split('\n')
        .map(|line| line.trim_matches(is_space))
        .filter(|line| !line.is_empty())
        .collect();
    let first = *lines.first()?;

    if lines.iter().all(|line| BULLET.is_match(line)) {
        let items = lines
            .iter()
            .map(|line| BULLET.replace(line, "").into_owned())
            .collect();
        return Some(DisplayBlock::List { items });
    }

    if is_heading(first) {
        let text = first.strip_suffix(':').unwrap_or(first).to_string();
        let body = (lines.len() > 1).then(|| lines[1..].join("\n"));
        return Some(DisplayBlock::Heading { text, body });
    }

    Some(DisplayBlock::Paragraph {
        text: block.to_string(),
    })
}

/// A line reads as a heading if it ends with a colon, or is a short
/// capitalized line of letters, digits, spaces, quotes and hyphens.
pub fn is_heading(line: &str) -> bool {
    line.ends_with(':')
        || (HEADING.is_match(line) && line.chars().count() < HEADING_MAX_CHARS)
}

impl fmt::Display for DisplayBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayBlock::Paragraph { text } => f.write_str(text),
            DisplayBlock::Heading { text, body: None } => f.write_str(text),
            DisplayBlock::Heading {
                text,
                body: Some(body),
            } => write!(f, "{text}\n{body}"),
            DisplayBlock::List { items } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "• {item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Render blocks for a terminal, separated by blank lines.
pub fn render_plain(blocks: &[DisplayBlock]) -> String {
    blocks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> DisplayBlock {
        DisplayBlock::Paragraph { text: text.into() }
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert_eq!(
            segment("Intro\n\u{FEFF}\nMore text here."),
            vec![
                DisplayBlock::Heading {
                    text: "Intro".into(),
                    body: None
                },
                paragraph("More text here."),
            ]
        );
        assert!(segment("\u{FEFF}").is_empty());
        assert_eq!(
            segment("-\u{FEFF}a\n- b\u{FEFF}"),
            vec![DisplayBlock::List {
                items: vec!["a".into(), "b".into()]
            }]
        );
    }

    #[test]
    fn next_line_character_is_not_whitespace() {
        assert_eq!(segment("\u{85}"), vec![paragraph("\u{85}")]);
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n\n").is_empty());
        assert!(segment("   \n \t \n  ").is_empty());
    }

    #[test]
    fn colon_heading_with_body() {
        assert_eq!(
            segment("Title:\nline one\nline two"),
            vec![DisplayBlock::Heading {
                text: "Title".into(),
                body: Some("line one\nline two".into()),
            }]
        );
    }

    #[test]
    fn bullet_list() {
        assert_eq!(
            segment("- a\n- b\n- c"),
            vec![DisplayBlock::List {
                items: vec!["a".into(), "b".into(), "c".into()],
            }]
        );
        assert_eq!(
            segment("*  star\n-\tdash"),
            vec![DisplayBlock::List {
                items: vec!["star".into(), "dash".into()],
            }]
        );
    }

    #[test]
    fn mixed_bullets_and_prose_is_not_a_list() {
        let blocks = segment("- a\nnot a bullet");
        assert_eq!(blocks, vec![paragraph("- a\nnot a bullet")]);
    }

    #[test]
    fn bullet_needs_whitespace_after_marker() {
        assert_eq!(segment("-a\n-b"), vec![paragraph("-a\n-b")]);
    }

    #[test]
    fn short_capitalized_line_is_standalone_heading() {
        assert_eq!(
            segment("Introduction"),
            vec![DisplayBlock::Heading {
                text: "Introduction".into(),
                body: None,
            }]
        );
    }

    #[test]
    fn capitalized_first_line_introduces_body() {
        assert_eq!(
            segment("Why it matters\nBecause reasons."),
            vec![DisplayBlock::Heading {
                text: "Why it matters".into(),
                body: Some("Because reasons.".into()),
            }]
        );
    }

    #[test]
    fn sentence_with_punctuation_is_paragraph() {
        let text = "This is a sentence, with a comma.";
        assert_eq!(segment(text), vec![paragraph(text)]);
    }

    #[test]
    fn lowercase_start_is_paragraph() {
        assert_eq!(segment("hello there"), vec![paragraph("hello there")]);
    }

    #[test]
    fn heading_length_boundary() {
        let fifty_nine = format!("A{}", "b".repeat(58));
        assert!(is_heading(&fifty_nine));
        let sixty = format!("A{}", "b".repeat(59));
        assert!(!is_heading(&sixty));
        let long_colon = format!("{}:", "x".repeat(200));
        assert!(is_heading(&long_colon));
    }

    #[test]
    fn only_one_trailing_colon_removed() {
        assert_eq!(
            segment("Note::"),
            vec![DisplayBlock::Heading {
                text: "Note:".into(),
                body: None,
            }]
        );
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let text = "Subject: Application\n\nDear team,\nI am applying.\n\n\n- one\n- two\n   \nThanks";
        let blocks = segment(text);
        assert_eq!(blocks.len(), 4);
        // The colon is mid-line and not allowed by the capitalized pattern.
        assert_eq!(blocks[0], paragraph("Subject: Application"));
        assert_eq!(blocks[1], paragraph("Dear team,\nI am applying."));
        assert!(matches!(blocks[2], DisplayBlock::List { .. }));
        assert_eq!(
            blocks[3],
            DisplayBlock::Heading {
                text: "Thanks".into(),
                body: None,
            }
        );
    }

    #[test]
    fn paragraph_keeps_block_verbatim() {
        let text = "first line, lower\n   indented second\n";
        assert_eq!(segment(text), vec![paragraph(text)]);
    }

    #[test]
    fn never_panics_on_odd_input() {
        // Deterministic LCG over a pool of awkward characters.
        let pool: Vec<char> = "ab Z-*:\n\n\t\r'\"é漢🙂\u{200b}\u{a0}.,".chars().collect();
        let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
        for len in [0usize, 1, 2, 3, 17, 256, 4096] {
            for _ in 0..50 {
                let s: String = (0..len)
                    .map(|_| {
                        state = state
                            .wrapping_mul(6364136223846793005)
                            .wrapping_add(1442695040888963407);
                        pool[(state >> 33) as usize % pool.len()]
                    })
                    .collect();
                let _ = segment(&s);
            }
        }
        let _ = segment(&"A".repeat(100_000));
        let _ = segment(":");
        let _ = segment("-");
    }

    #[test]
    fn plain_rendering() {
        let blocks = segment("Plan:\nstep one\n\n- a\n- b\n\nclosing words.");
        assert_eq!(
            render_plain(&blocks),
            "Plan\nstep one\n\n• a\n• b\n\nclosing words."
        );
    }

    #[test]
    fn blocks_serialize_tagged() {
        let json = serde_json::to_value(segment("- a")).unwrap();
        assert_eq!(json[0]["kind"], "list");
        assert_eq!(json[0]["items"][0], "a");
    }
}
