use serde::Serialize;

use crate::dispatch::registry::{ApiFormat, ModelEntry};

#[derive(Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub label: String,
    pub api_format: ApiFormat,
}

impl From<&ModelEntry> for ModelInfo {
    fn from(entry: &ModelEntry) -> Self {
        Self {
            name: entry.model_id.to_string(),
            label: entry.label.to_string(),
            api_format: entry.format(),
        }
    }
}

#[derive(Serialize)]
pub struct ListModelsResponse {
    pub models: Vec<ModelInfo>,
    pub default_model: String,
    pub configured: bool,
}
