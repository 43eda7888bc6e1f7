//! Template-based generation backend.
//!
//! Renders deterministic answers from the retrieved contexts without calling
//! a language model. Useful for demos, tests and as a fallback.

use async_trait::async_trait;
use paimon_core::{Context, Error, GenerationRequest, GenerationStyle, Result};

use crate::backend::GenerationBackend;

/// Context block text used when generation receives no contexts.
pub const NO_CONTEXT_SENTINEL: &str = "No context available.";

const NO_MATCH_ANSWER: &str =
    "None of the stored entries match this question closely. Try rephrasing it or contact support.";

/// Template backend configuration and renderer.
#[derive(Debug, Clone)]
pub struct TemplateBackend {
    max_snippets: usize,
}

impl TemplateBackend {
    /// Creates a template backend showing up to three context snippets.
    #[must_use]
    pub fn new() -> Self {
        Self { max_snippets: 3 }
    }

    /// Sets the maximum number of context snippets rendered in an answer.
    #[must_use]
    pub fn with_max_snippets(mut self, max_snippets: usize) -> Self {
        self.max_snippets = max_snippets.max(1);
        self
    }

    /// Renders the answer for a request.
    #[must_use]
    pub fn render(&self, request: &GenerationRequest) -> String {
        let style = request.style;
        let shown = match style {
            GenerationStyle::Concise => 1,
            GenerationStyle::Balanced | GenerationStyle::Analytical => self.max_snippets,
        };

        let context_block = if request.contexts.is_empty() {
            NO_CONTEXT_SENTINEL.to_string()
        } else {
            request
                .contexts
                .iter()
                .take(shown)
                .map(|c| render_snippet(c, style))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "[{} answer by {}]\nQuestion: {}\nContext considered:\n{}\n\nAnswer: {}",
            style.title(),
            request.model,
            request.query,
            context_block,
            compose_answer(&request.contexts, style),
        )
    }
}

impl Default for TemplateBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn render_snippet(context: &Context, style: GenerationStyle) -> String {
    match style {
        GenerationStyle::Analytical => format!(
            "- [{} | score {:.2}] {}",
            context.source, context.score, context.text
        ),
        GenerationStyle::Concise | GenerationStyle::Balanced => format!("- {}", context.text),
    }
}

/// Pulls the answer half out of `Q: ...\nA: ...` passages.
fn answer_part(text: &str) -> &str {
    text.split_once("\nA:")
        .map_or(text, |(_, answer)| answer)
        .trim()
}

fn compose_answer(contexts: &[Context], style: GenerationStyle) -> String {
    if contexts.is_empty() {
        return "I could not find any stored information for this question. \
                Please contact support for help."
            .to_string();
    }

    let Some(best) = contexts.iter().find(|c| c.score > 0.0) else {
        return NO_MATCH_ANSWER.to_string();
    };
    let core = answer_part(&best.text);

    match style {
        GenerationStyle::Concise => core.to_string(),
        GenerationStyle::Balanced => {
            format!("Based on the context above, here is a helpful response. {core}")
        }
        GenerationStyle::Analytical => {
            let relevant = contexts.iter().filter(|c| c.score > 0.0).count();
            format!(
                "{relevant} of {} retrieved passages overlap with the question; the strongest \
                 match is {} (score {:.2}). {core} If this does not cover your case, the other \
                 passages listed above may add detail.",
                contexts.len(),
                best.source,
                best.score,
            )
        }
    }
}

#[async_trait]
impl GenerationBackend for TemplateBackend {
    async fn produce(&self, request: &GenerationRequest) -> Result<String> {
        let answer = self.render(request);
        if answer.trim().is_empty() {
            return Err(Error::generation(self.name(), "rendered an empty answer"));
        }

        tracing::debug!(
            model = %request.model,
            style = %request.style,
            contexts = request.contexts.len(),
            answer_len = answer.len(),
            "Template answer rendered"
        );

        Ok(answer)
    }

    fn name(&self) -> &str {
        "template"
    }
}
