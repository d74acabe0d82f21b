pub mod chat;
pub mod http;
pub mod reasoning;
pub mod registry;

use crate::config::GenerationDefaults;
use crate::dispatch::registry::ApiFormat;
use crate::message::Message;
use crate::tools::enums::{ReasoningEffort, ReasoningSummary};

/// Everything one `generate` call needs. Both wire formats are built from
/// this; each ignores the fields the other format owns.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub user_text: String,
    pub model: String,
    /// Chat path only. Passed through unclamped.
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Chat path only. Passed through unclamped.
    pub top_p: f64,
    pub system_text: Option<String>,
    pub prior_messages: Vec<Message>,
    /// Reasoning path only.
    pub reasoning_effort: ReasoningEffort,
    /// Reasoning path only.
    pub reasoning_summary: ReasoningSummary,
    /// Reasoning path only: ask the backend to keep the response.
    pub store: bool,
}

impl PromptRequest {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self::from_defaults(user_text, &GenerationDefaults::default())
    }

    pub fn from_defaults(user_text: impl Into<String>, defaults: &GenerationDefaults) -> Self {
        Self {
            user_text: user_text.into(),
            model: defaults.model.clone(),
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
            top_p: defaults.top_p,
            system_text: None,
            prior_messages: Vec::new(),
            reasoning_effort: defaults.reasoning_effort,
            reasoning_summary: defaults.reasoning_summary,
            store: defaults.store,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.system_text = Some(text.into());
        self
    }

    /// System text worth sending; blank text means no system turn.
    pub fn system_text(&self) -> Option<&str> {
        self.system_text.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn with_history(mut self, messages: Vec<Message>) -> Self {
        self.prior_messages = messages;
        self
    }
}

/// Outcome of a successful `generate` call.
#[derive(Debug)]
pub struct GenerateResult {
    pub text: String,
    pub model: String,
    pub format: ApiFormat,
    pub latency_ms: u64,
}
