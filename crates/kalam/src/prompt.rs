//! Prompt templates keyed by [`Mode`].
//!
//! [`build_prompt`] is a pure function: the same request always renders the
//! same [`PromptSpec`]. Templates are static text with the user's input
//! substituted verbatim (no escaping) and, for the modes that have one, a
//! word-limit clause that disappears entirely when no limit is set.

use crate::mode::{GenerationRequest, Mode};

/// A fully rendered prompt and whether its reply must be JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub prompt_text: String,
    pub expects_structured_reply: bool,
}

/// Render the prompt for a request.
pub fn build_prompt(request: &GenerationRequest) -> PromptSpec {
    render(request.mode, &request.input_text, request.word_limit)
}

/// Render the prompt for loose parts. `word_limit` is ignored by modes
/// without a length clause.
pub fn render(mode: Mode, input_text: &str, word_limit: Option<u32>) -> PromptSpec {
    let prompt_text = match mode {
        Mode::Ask => ask_template(input_text, word_limit),
        Mode::Rewrite => rewrite_template(input_text),
        Mode::Mail => mail_template(input_text),
        Mode::Research => research_template(input_text, word_limit),
        Mode::Post => post_template(input_text, word_limit),
    };
    PromptSpec {
        prompt_text,
        expects_structured_reply: mode.expects_structured_reply(),
    }
}

/// Render `clause` with the limit substituted, or nothing at all.
fn limit_clause(word_limit: Option<u32>, clause: impl FnOnce(u32) -> String) -> String {
    word_limit.filter(|&n| n > 0).map(clause).unwrap_or_default()
}

fn ask_template(topic: &str, word_limit: Option<u32>) -> String {
    let limit = limit_clause(word_limit, |n| {
        format!(
            "Aim for around {n} words, ensuring the content remains coherent, balanced, and impactful."
        )
    });
    format!(
        r#"
You are *Kalam*, an expert and insightful writer known for producing original, plagiarism-free, and human-like text.
Your writing should be engaging, logically structured, and demonstrate clarity, creativity, and depth.

Write a well-crafted and thoughtful piece on the topic: **"{topic}"**.

{limit}

Focus on:
- A clear introduction, body, and conclusion
- Smooth transitions and natural tone
- Creative yet professional expression
- Original ideas with strong readability
"#
    )
}

fn rewrite_template(text: &str) -> String {
    format!(
        r#"
You are *Kalam*, an expert editor and rewriter renowned for transforming text into engaging, polished, and natural prose.
Your task is to comprehensively rewrite the given content to enhance clarity, flow, and readability — not merely paraphrase it.

Guidelines:
- Maintain the original meaning and intent.
- Eliminate all traces of plagiarism — ensure the rewrite is 100% original.  
- Use a natural, human-like tone with smooth transitions and coherent structure.
- Improve vocabulary, sentence rhythm, and overall quality without overcomplicating the language.

Here is the original text to rewrite:
"""
{text}
"""
"#
    )
}

fn mail_template(job_description: &str) -> String {
    format!(
        r#"
You are *Kalam*, an expert career coach and professional writer skilled in crafting personalized, high-impact cold emails for job applications.

Your task:
Write a short, crisp, and persuasive cold email (around 80–200 words) tailored for a specific job role.

Guidelines:
- The tone should be confident, polite, and genuinely human-like and must be natural not like ai generated.
- Clearly convey enthusiasm and alignment with the job.
- Keep the message concise and professional — avoid buzzwords or exaggeration.  
- The email must feel natural and personalized, not robotic or templated.
- Say thanks and express eagerness for a response in next line.

Format your response **strictly** as a single JSON object with the following keys:
{{
  "subject": "string",
  "body": "string",
  "Regards": "string"
}}

Job Description:
"""
{job_description}
"""
"#
    )
}

fn research_template(topic: &str, word_limit: Option<u32>) -> String {
    let limit = limit_clause(word_limit, |n| {
        format!("Target length: approximately {n} words.")
    });
    format!(
        r#"
You are *Kalam*, an expert researcher and academic writer known for producing insightful, original, and well-structured research articles.
Your goal is to create a plagiarism-free, human-like, and comprehensive research piece on the given topic.

Guidelines:
- Maintain a formal and objective academic tone.
- Organize the article into clear sections: Abstract, Introduction, Methodology, Results/Discussion, and Conclusion (where relevant).
- Ensure logical flow, strong coherence, and evidence-backed arguments.
- Avoid repetition, filler, or generic statements.
- Cite or refer to ideas conceptually without copying — everything must be authentically written.  

Topic:
**"{topic}"**

{limit}
"#
    )
}

fn post_template(topic: &str, word_limit: Option<u32>) -> String {
    let limit = limit_clause(word_limit, |n| format!("Target length: around {n} words."));
    format!(
        r#"
You are *Kalam*, an expert social media strategist and storyteller known for crafting highly engaging and authentic LinkedIn posts.

Your task:
Write a professional, conversational, and thought-provoking LinkedIn post about the topic below.

Guidelines:
- Start with a strong hook that grabs attention in the first line.
- Use a natural, human-like tone — avoid sounding robotic or overly polished.  
- Share a clear insight, takeaway, or personal perspective related to the topic.
- Encourage readers to reflect, comment, or share their thoughts.
- Maintain professionalism while keeping it relatable and warm.
- Add 3–5 relevant hashtags at the end for visibility.

Topic:
**"{topic}"**

{limit}
"#
    )
}
