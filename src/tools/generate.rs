use schemars::JsonSchema;
use serde::Deserialize;

use crate::config::GenerationDefaults;
use crate::dispatch::PromptRequest;
use crate::message::Message;
use crate::tools::enums::{ReasoningEffort, ReasoningSummary};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateRequest {
    /// The prompt to send. Must not be empty.
    pub prompt: String,
    /// Model name from `listmodels` output (defaults to the configured model).
    /// Reasoning models (o1/o3 family) use the responses endpoint automatically.
    pub model: Option<String>,
    /// System prompt to set model behavior. Sent as a developer message to reasoning models.
    pub system_prompt: Option<String>,
    /// Sampling temperature, 0.0 to 2.0. Chat models only.
    pub temperature: Option<f64>,
    /// Maximum tokens to generate. Chat models only.
    pub max_output_tokens: Option<u32>,
    /// Nucleus sampling cutoff, 0.0 to 1.0. Chat models only.
    pub top_p: Option<f64>,
    /// Reasoning effort: "low", "medium", "high". Reasoning models only.
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Reasoning summary: "auto" or "disabled". Reasoning models only.
    pub reasoning_summary: Option<ReasoningSummary>,
    /// Ask the backend to store the response. Reasoning models only.
    pub store: Option<bool>,
    /// Earlier conversation turns, oldest first.
    pub history: Option<Vec<Message>>,
}

impl GenerateRequest {
    pub fn model_or_default<'a>(&'a self, defaults: &'a GenerationDefaults) -> &'a str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.model.as_str())
    }

    /// Fill unset fields from `defaults`.
    pub fn into_prompt_request(self, defaults: &GenerationDefaults) -> PromptRequest {
        let model = self.model_or_default(defaults).to_string();
        PromptRequest {
            model,
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: self.max_output_tokens.unwrap_or(defaults.max_output_tokens),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            system_text: self.system_prompt.filter(|s| !s.trim().is_empty()),
            prior_messages: self.history.unwrap_or_default(),
            reasoning_effort: self.reasoning_effort.unwrap_or(defaults.reasoning_effort),
            reasoning_summary: self.reasoning_summary.unwrap_or(defaults.reasoning_summary),
            store: self.store.unwrap_or(defaults.store),
            user_text: self.prompt,
        }
    }
}

/// Temperature must be finite and within 0.0..=2.0 when given.
pub fn validate_temperature(temp: Option<f64>) -> Result<(), String> {
    if let Some(t) = temp
        && (!t.is_finite() || !(0.0..=2.0).contains(&t))
    {
        return Err(format!("temperature must be between 0.0 and 2.0, got {t}"));
    }
    Ok(())
}

/// top_p must be finite and within 0.0..=1.0 when given.
pub fn validate_top_p(top_p: Option<f64>) -> Result<(), String> {
    if let Some(p) = top_p
        && (!p.is_finite() || !(0.0..=1.0).contains(&p))
    {
        return Err(format!("top_p must be between 0.0 and 1.0, got {p}"));
    }
    Ok(())
}

pub fn validate_max_output_tokens(max: Option<u32>) -> Result<(), String> {
    if max == Some(0) {
        return Err("max_output_tokens must be greater than 0".to_string());
    }
    Ok(())
}

/// History turns must each carry at least one segment.
pub fn validate_history(history: Option<&[Message]>) -> Result<(), String> {
    if let Some(pos) = history.and_then(|h| h.iter().position(|m| m.segments.is_empty())) {
        return Err(format!("history[{pos}] has no content segments"));
    }
    Ok(())
}
