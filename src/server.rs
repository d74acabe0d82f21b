use std::sync::Arc;
use std::time::Instant;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use crate::config::Config;
use crate::dispatch::registry::{Registry, classify};
use crate::response::{ToolMetadata, ToolResponse};
use crate::tools::generate::{self, GenerateRequest};
use crate::tools::listmodels::{ListModelsResponse, ModelInfo};

#[derive(Clone)]
pub struct GenbridgeServer {
    registry: Arc<Registry>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GenbridgeServer {
    pub fn new(config: Config) -> Self {
        Self::with_registry(Arc::new(Registry::from_config(config)))
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            tool_router: Self::tool_router(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[tool(
        name = "generate",
        description = "Send a prompt to a text-generation model and get the complete reply text. Chat and reasoning models are routed automatically. Use `listmodels` for model names.",
        annotations(read_only_hint = true)
    )]
    async fn generate(
        &self,
        Parameters(req): Parameters<GenerateRequest>,
    ) -> Result<CallToolResult, McpError> {
        generate::validate_temperature(req.temperature)
            .map_err(|msg| McpError::invalid_params(msg, None))?;
        generate::validate_top_p(req.top_p).map_err(|msg| McpError::invalid_params(msg, None))?;
        generate::validate_max_output_tokens(req.max_output_tokens)
            .map_err(|msg| McpError::invalid_params(msg, None))?;
        generate::validate_history(req.history.as_deref())
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        let prompt = req.into_prompt_request(&self.registry.config().defaults);
        let model = prompt.model.clone();
        let api_format = classify(&model).to_string();
        let start = Instant::now();

        let response = match self.registry.query(&prompt).await {
            Ok(result) => ToolResponse::success(
                result.text,
                "text",
                ToolMetadata {
                    tool_name: "generate".to_string(),
                    model_used: result.model,
                    api_format,
                    duration_seconds: start.elapsed().as_secs_f64(),
                    error_kind: None,
                    retryable: None,
                },
            ),
            Err(e) => {
                tracing::warn!(model, kind = e.kind(), "generate failed: {e}");
                ToolResponse::error(
                    e.user_message(),
                    ToolMetadata {
                        tool_name: "generate".to_string(),
                        model_used: model,
                        api_format,
                        duration_seconds: start.elapsed().as_secs_f64(),
                        error_kind: Some(e.kind()),
                        retryable: Some(e.is_retryable()),
                    },
                )
            }
        };

        Ok(response.into_call_tool_result())
    }

    #[tool(
        name = "listmodels",
        description = "List selectable text-generation models with their display labels and wire format (chat or reasoning).",
        annotations(read_only_hint = true)
    )]
    async fn listmodels(&self) -> Result<CallToolResult, McpError> {
        let list = ListModelsResponse {
            models: self.registry.list_models().iter().map(ModelInfo::from).collect(),
            default_model: self.registry.config().defaults.model.clone(),
            configured: self.registry.is_configured(),
        };

        let response = match serde_json::to_string_pretty(&list) {
            Ok(json) => ToolResponse::success(
                json,
                "json",
                ToolMetadata {
                    tool_name: "listmodels".to_string(),
                    model_used: "none".to_string(),
                    api_format: "none".to_string(),
                    duration_seconds: 0.0,
                    error_kind: None,
                    retryable: None,
                },
            ),
            Err(e) => ToolResponse::error(
                format!("failed to serialize model list: {e}"),
                ToolMetadata {
                    tool_name: "listmodels".to_string(),
                    model_used: "none".to_string(),
                    api_format: "none".to_string(),
                    duration_seconds: 0.0,
                    error_kind: Some("serialization"),
                    retryable: Some(false),
                },
            ),
        };

        Ok(response.into_call_tool_result())
    }
}

#[tool_handler]
impl ServerHandler for GenbridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "genbridge".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "genbridge: one-shot text generation over chat and reasoning models.\n\n\
                 1. Call `listmodels` for exact model names. Reasoning models (o1/o3) ignore \
                    temperature and top_p and take `reasoning_effort` instead.\n\
                 2. Call `generate` with a prompt. Pass `history` for multi-turn context.\n\
                 3. On `status: \"error\"`, check `metadata.error_kind`: `not_configured` needs \
                    setup, `upstream_error`/`network_failure` with `retryable: true` can be retried."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
