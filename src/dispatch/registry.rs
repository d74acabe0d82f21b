use std::time::Instant;

use serde::Serialize;

use crate::config::Config;
use crate::dispatch::http::HttpDispatch;
use crate::dispatch::{GenerateResult, PromptRequest, chat, reasoning};
use crate::error::GenError;
use crate::parsers;

/// Models served by the reasoning endpoint. Everything else goes to chat.
pub const REASONING_MODELS: &[&str] = &["o1-preview", "o1-mini", "o3", "o3-mini"];

/// Wire format a model requires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFormat {
    /// Chat completions: string content, temperature and top_p.
    #[default]
    Chat,
    /// Responses API: segmented content, effort and summary.
    Reasoning,
}

impl ApiFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Reasoning => "reasoning",
        }
    }

    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Chat => chat::CHAT_PATH,
            Self::Reasoning => reasoning::REASONING_PATH,
        }
    }
}

impl std::fmt::Display for ApiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which wire format a model id needs. Unknown ids, including the empty
/// string, are chat models.
pub fn classify(model_id: &str) -> ApiFormat {
    if REASONING_MODELS.contains(&model_id) {
        ApiFormat::Reasoning
    } else {
        ApiFormat::Chat
    }
}

/// A selectable model with its display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelEntry {
    pub model_id: &'static str,
    pub label: &'static str,
}

impl ModelEntry {
    pub fn format(&self) -> ApiFormat {
        classify(self.model_id)
    }
}

/// Models offered for selection, in display order.
pub const AVAILABLE_MODELS: &[ModelEntry] = &[
    ModelEntry { model_id: "gpt-3.5-turbo", label: "GPT-3.5 Turbo" },
    ModelEntry { model_id: "gpt-4", label: "GPT-4" },
    ModelEntry { model_id: "gpt-4-turbo", label: "GPT-4 Turbo" },
    ModelEntry { model_id: "o1-preview", label: "O1 Preview (Reasoning)" },
    ModelEntry { model_id: "o1-mini", label: "O1 Mini (Reasoning)" },
    ModelEntry { model_id: "o3", label: "O3 (Advanced Reasoning)" },
    ModelEntry { model_id: "o3-mini", label: "O3 Mini (Reasoning)" },
];

/// The adapter: one configured credential, one HTTP client, and the
/// routing between the two wire formats. Built once and shared by handle;
/// holds no per-call state, so concurrent calls are independent.
pub struct Registry {
    config: Config,
    http: HttpDispatch,
}

impl Registry {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            http: HttpDispatch::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn list_models(&self) -> &'static [ModelEntry] {
        AVAILABLE_MODELS
    }

    pub fn get(&self, model: &str) -> Option<&'static ModelEntry> {
        AVAILABLE_MODELS.iter().find(|m| m.model_id == model)
    }

    /// Send a prompt and return only the text.
    pub async fn generate(&self, req: &PromptRequest) -> Result<String, GenError> {
        self.query(req).await.map(|r| r.text)
    }

    /// Validate, route, send, and extract. Input and configuration are
    /// checked before any network activity.
    pub async fn query(&self, req: &PromptRequest) -> Result<GenerateResult, GenError> {
        if req.user_text.trim().is_empty() {
            return Err(GenError::InvalidInput("prompt must not be empty".to_string()));
        }

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            GenError::NotConfigured(
                "no API key configured; set OPENAI_API_KEY".to_string(),
            )
        })?;

        let start = Instant::now();
        let format = classify(&req.model);
        let url = self.config.endpoint(format.endpoint_path());

        if self.get(&req.model).is_none() {
            tracing::debug!(model = req.model, "model not in catalog, routing as {format}");
        }

        let body = match format {
            ApiFormat::Chat => {
                let payload = chat::build_payload(req);
                tracing::debug!(
                    model = payload.model,
                    messages = payload.messages.len(),
                    max_tokens = payload.max_tokens,
                    "sending chat request"
                );
                self.http
                    .post_json(&url, api_key, &payload, self.config.timeout, format.as_str())
                    .await?
            }
            ApiFormat::Reasoning => {
                let payload = reasoning::build_payload(req);
                tracing::debug!(
                    model = payload.model,
                    messages = payload.input.len(),
                    effort = payload.reasoning.effort,
                    "sending reasoning request"
                );
                self.http
                    .post_json(&url, api_key, &payload, self.config.timeout, format.as_str())
                    .await?
            }
        };

        let text = parsers::parse(&body)?;
        let latency_ms = start.elapsed().as_millis() as u64;

        tracing::info!(model = req.model, format = %format, latency_ms, "generation complete");

        Ok(GenerateResult {
            text,
            model: req.model.clone(),
            format,
            latency_ms,
        })
    }
}
