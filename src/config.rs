use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::tools::enums::{ReasoningEffort, ReasoningSummary};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONFIG_FILE: &str = "genbridge.toml";

/// Env vars checked for the credential, in order.
const API_KEY_VARS: &[&str] = &["OPENAI_API_KEY", "NEXT_PUBLIC_OPENAI_API_KEY"];

/// Generation parameters used when a request leaves them unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub reasoning_effort: ReasoningEffort,
    pub reasoning_summary: ReasoningSummary,
    pub store: bool,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 1.0,
            max_output_tokens: 2048,
            top_p: 1.0,
            reasoning_effort: ReasoningEffort::Medium,
            reasoning_summary: ReasoningSummary::Auto,
            store: true,
        }
    }
}

/// Shape of the optional TOML file. Every field is optional so a partial
/// file only overrides what it names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub defaults: Option<GenerationDefaults>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Process-wide settings, read once at startup and handed to the
/// [`Registry`](crate::dispatch::registry::Registry).
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub defaults: GenerationDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            defaults: GenerationDefaults::default(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if self.api_key.is_some() {
            "[REDACTED]"
        } else {
            "<unset>"
        };
        f.debug_struct("Config")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl Config {
    /// Environment plus the optional TOML file.
    pub fn load() -> Self {
        let path = env::var("GENBRIDGE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::from_env();
        if let Some(file) = read_file_config(&path) {
            config.apply_file(file);
        }
        // Env wins over the file for the endpoint.
        if let Some(url) = non_blank_var("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        config
    }

    pub fn from_env() -> Self {
        let api_key = API_KEY_VARS.iter().find_map(|var| non_blank_var(var));
        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; generate calls will fail until configured");
        }

        let base_url = non_blank_var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            api_key,
            base_url,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(url) = file.base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(secs) = file.timeout_secs.filter(|s| *s > 0) {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(defaults) = file.defaults {
            self.defaults = defaults;
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Endpoint URL for a path under the base, tolerant of a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn read_file_config(path: &Path) -> Option<FileConfig> {
    let text = std::fs::read_to_string(path).ok()?;
    match FileConfig::parse(&text) {
        Ok(file) => {
            tracing::info!(path = %path.display(), "loaded config file");
            Some(file)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring malformed config file: {e}");
            None
        }
    }
}
