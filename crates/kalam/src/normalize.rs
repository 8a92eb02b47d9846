//! Map a completion to the text shown in the output pane.
//!
//! Free-form modes show the completion text as-is. The structured (mail)
//! mode extracts `subject` and `body` from a JSON reply, tolerating
//! surrounding code fences. Extraction failure is not fatal: the raw text is
//! shown behind an explanatory line.

use serde_json::{Number, Value};
use tracing::warn;

use crate::completion::CompletionResult;

/// Prefix of the display text when a structured reply cannot be read.
pub const PARSE_ERROR_PREFIX: &str = "Error parsing the response. Raw output:\n\n";

/// Subject and body of a structured mail reply, as display text.
///
/// Any other keys (the template asks for a `Regards` sign-off) are ignored
/// whatever their type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReply {
    pub subject: String,
    pub body: String,
}

impl MailReply {
    /// `"Subject: <subject>\n\n<body>"`.
    pub fn display_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

/// Produce display text for a completion.
pub fn normalize(result: &CompletionResult, expects_structured_reply: bool) -> String {
    if !expects_structured_reply {
        return result.as_str().to_string();
    }

    let raw = result.as_str();
    match parse_mail_reply(raw) {
        Ok(reply) => reply.display_text(),
        Err(e) => {
            warn!("Could not read structured reply: {e}");
            format!("{PARSE_ERROR_PREFIX}{raw}")
        }
    }
}

/// Remove code-fence markers anywhere in the text, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a structured reply, ignoring "```json" and "```" markers.
///
/// The reply must be a JSON object with `subject` and `body` keys. Their
/// values need not be strings; see [`value_text`]. A repeated key keeps its
/// last value.
pub fn parse_mail_reply(raw: &str) -> Result<MailReply, String> {
    let value: Value = serde_json::from_str(&strip_code_fences(raw))
        .map_err(|e| format!("invalid mail reply: {e}"))?;
    let field = |name: &str| {
        value
            .get(name)
            .map(value_text)
            .ok_or_else(|| format!("invalid mail reply: missing field `{name}`"))
    };
    Ok(MailReply {
        subject: field("subject")?,
        body: field("body")?,
    })
}

/// Text of a JSON value as it reads when interpolated into a template
/// string: strings unquoted, arrays joined by commas with nulls left empty,
/// objects as `[object Object]`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// Whole floats print without a fractional part ("2.0" reads "2").
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CompletionResult {
        CompletionResult::Text(s.to_string())
    }

    #[test]
    fn free_form_is_identity() {
        let samples = ["", "plain", "Title:\nbody", "Error: something", "{\"subject\":\"x\"}"];
        for s in samples {
            assert_eq!(normalize(&text(s), false), s);
        }
    }

    #[test]
    fn free_form_failure_is_shown_verbatim() {
        let failed = CompletionResult::Failed("Error: request failed: timed out".into());
        assert_eq!(normalize(&failed, false), "Error: request failed: timed out");
    }

    #[test]
    fn fenced_mail_reply() {
        let raw = "```json\n{\"subject\":\"S\",\"body\":\"B\"}\n```";
        assert_eq!(normalize(&text(raw), true), "Subject: S\n\nB");
    }

    #[test]
    fn bare_mail_reply_with_regards() {
        let raw = r#"{"subject":"Application","body":"Hello...","Regards":"Sam"}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: Application\n\nHello...");
    }

    #[test]
    fn sign_off_of_any_type_is_ignored() {
        let raw = r#"{"subject":"S","body":"B","Regards":{"name":"Sam"}}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: S\n\nB");
        let raw = r#"{"subject":"S","body":"B","Regards":null}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: S\n\nB");
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let raw = r#"{"subject":"A","subject":"B","body":"C"}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: B\n\nC");
    }

    #[test]
    fn non_string_fields_are_shown_as_text() {
        let raw = r#"{"subject":"S","body":["p1","p2"]}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: S\n\np1,p2");
        let raw = r#"{"subject":42,"body":{"text":"hi"}}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: 42\n\n[object Object]");
        let raw = r#"{"subject":null,"body":true}"#;
        assert_eq!(normalize(&text(raw), true), "Subject: null\n\ntrue");
    }

    #[test]
    fn value_text_conversions() {
        use serde_json::json;
        assert_eq!(value_text(&json!("plain")), "plain");
        assert_eq!(value_text(&json!(2.0)), "2");
        assert_eq!(value_text(&json!(1.5)), "1.5");
        assert_eq!(value_text(&json!(-7)), "-7");
        assert_eq!(value_text(&json!(["a", null, 3, ["b", "c"]])), "a,,3,b,c");
        assert_eq!(value_text(&json!([])), "");
    }

    #[test]
    fn non_object_reply_is_a_parse_failure() {
        for raw in ["[1, 2]", "\"just a string\"", "42"] {
            assert!(normalize(&text(raw), true).starts_with(PARSE_ERROR_PREFIX));
        }
    }

    #[test]
    fn unparseable_reply_shows_raw_output() {
        assert_eq!(
            normalize(&text("not json"), true),
            "Error parsing the response. Raw output:\n\nnot json"
        );
    }

    #[test]
    fn missing_body_is_a_parse_failure() {
        let raw = r#"{"subject":"only"}"#;
        let shown = normalize(&text(raw), true);
        assert!(shown.starts_with(PARSE_ERROR_PREFIX));
        assert!(shown.ends_with(raw));
    }

    #[test]
    fn failed_structured_completion_is_wrapped() {
        let failed = CompletionResult::Failed("Error: Failed to generate valid JSON response".into());
        assert_eq!(
            normalize(&failed, true),
            "Error parsing the response. Raw output:\n\nError: Failed to generate valid JSON response"
        );
    }

    #[test]
    fn strip_code_fences_removes_every_marker() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {} "), "{}");
        assert_eq!(strip_code_fences("a```b```json c"), "ab c");
    }

    #[test]
    fn fences_inside_the_text_are_removed_too() {
        let raw = "Here you go:\n```json\n{\"subject\":\"S\",\"body\":\"B\"}\n```";
        // Leading prose survives fence removal, so this still fails to parse.
        assert!(normalize(&text(raw), true).starts_with(PARSE_ERROR_PREFIX));
        let raw = "  ```{\"subject\":\"S\",\"body\":\"line 1\\nline 2\"}```  ";
        assert_eq!(normalize(&text(raw), true), "Subject: S\n\nline 1\nline 2");
    }
}
