use genbridge::config::{Config, FileConfig, GenerationDefaults};
use genbridge::error::GenError;
use genbridge::response::{ToolMetadata, ToolResponse};
use genbridge::server::GenbridgeServer;
use genbridge::tools::enums::{ReasoningEffort, ReasoningSummary};
use genbridge::tools::generate::{
    GenerateRequest, validate_history, validate_max_output_tokens, validate_temperature,
    validate_top_p,
};
use genbridge::message::Message;
use rmcp::ServerHandler;

fn bare_request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        prompt: prompt.to_string(),
        model: None,
        system_prompt: None,
        temperature: None,
        max_output_tokens: None,
        top_p: None,
        reasoning_effort: None,
        reasoning_summary: None,
        store: None,
        history: None,
    }
}

// ---------------------------------------------------------------------------
// Tool response envelope
// ---------------------------------------------------------------------------

#[test]
fn tool_response_success_serializes_correctly() {
    let response = ToolResponse::success(
        "hello from gpt".to_string(),
        "text",
        ToolMetadata {
            tool_name: "generate".to_string(),
            model_used: "gpt-4".to_string(),
            api_format: "chat".to_string(),
            duration_seconds: 1.5,
            error_kind: None,
            retryable: None,
        },
    );

    let parsed = serde_json::to_value(&response).unwrap();
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["content"], "hello from gpt");
    assert_eq!(parsed["content_type"], "text");
    assert_eq!(parsed["metadata"]["model_used"], "gpt-4");
    assert_eq!(parsed["metadata"]["api_format"], "chat");
    assert!(parsed["metadata"]["duration_seconds"].is_f64());
    assert!(parsed["metadata"].get("error_kind").is_none());
}

#[test]
fn tool_response_error_carries_kind() {
    let err = GenError::NotConfigured("no API key configured; set OPENAI_API_KEY".to_string());
    let response = ToolResponse::error(
        err.user_message(),
        ToolMetadata {
            tool_name: "generate".to_string(),
            model_used: "o3".to_string(),
            api_format: "reasoning".to_string(),
            duration_seconds: f64::NAN,
            error_kind: Some(err.kind()),
            retryable: Some(err.is_retryable()),
        },
    );

    let parsed = serde_json::to_value(&response).unwrap();
    assert_eq!(parsed["status"], "error");
    assert!(parsed["content"].as_str().unwrap().starts_with("missing setup"));
    assert_eq!(parsed["metadata"]["error_kind"], "not_configured");
    assert_eq!(parsed["metadata"]["retryable"], false);
    assert_eq!(parsed["metadata"]["duration_seconds"], 0.0);
}

#[test]
fn call_tool_result_is_never_an_mcp_error() {
    let response = ToolResponse::error(
        "boom".to_string(),
        ToolMetadata {
            tool_name: "generate".to_string(),
            model_used: "gpt-4".to_string(),
            api_format: "chat".to_string(),
            duration_seconds: 0.1,
            error_kind: Some("upstream_error"),
            retryable: Some(false),
        },
    );
    let result = response.into_call_tool_result();
    assert_ne!(result.is_error, Some(true));
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[test]
fn error_kinds_are_distinct() {
    let errors = [
        GenError::InvalidInput("x".into()),
        GenError::NotConfigured("x".into()),
        GenError::Upstream {
            status: 400,
            message: "x".into(),
        },
        GenError::UnrecognizedResponseShape("x".into()),
    ];
    let mut kinds: Vec<&str> = errors.iter().map(GenError::kind).collect();
    kinds.sort();
    kinds.dedup();
    assert_eq!(kinds.len(), errors.len());
}

#[test]
fn upstream_retryability_follows_status() {
    let upstream = |status| GenError::Upstream {
        status,
        message: "x".into(),
    };
    assert!(upstream(429).is_retryable());
    assert!(upstream(500).is_retryable());
    assert!(!upstream(400).is_retryable());
    assert!(!upstream(401).is_retryable());
    assert!(!GenError::InvalidInput("x".into()).is_retryable());
}

#[test]
fn upstream_user_message_is_the_upstream_message() {
    let err = GenError::Upstream {
        status: 401,
        message: "Incorrect API key provided".into(),
    };
    assert_eq!(err.user_message(), "Incorrect API key provided");
    assert_eq!(err.to_string(), "upstream error (401): Incorrect API key provided");
}

// ---------------------------------------------------------------------------
// Tool request handling
// ---------------------------------------------------------------------------

#[test]
fn generate_request_fills_defaults() {
    let defaults = GenerationDefaults::default();
    let req = bare_request("hello").into_prompt_request(&defaults);

    assert_eq!(req.user_text, "hello");
    assert_eq!(req.model, "gpt-3.5-turbo");
    assert_eq!(req.temperature, 1.0);
    assert_eq!(req.max_output_tokens, 2048);
    assert_eq!(req.top_p, 1.0);
    assert_eq!(req.reasoning_effort, ReasoningEffort::Medium);
    assert_eq!(req.reasoning_summary, ReasoningSummary::Auto);
    assert!(req.store);
    assert!(req.system_text.is_none());
    assert!(req.prior_messages.is_empty());
}

#[test]
fn generate_request_blank_model_uses_default() {
    let defaults = GenerationDefaults::default();
    let mut req = bare_request("hello");
    req.model = Some("  ".to_string());
    assert_eq!(req.model_or_default(&defaults), "gpt-3.5-turbo");

    req.model = Some("o3".to_string());
    assert_eq!(req.model_or_default(&defaults), "o3");
}

#[test]
fn generate_request_overrides_win() {
    let defaults = GenerationDefaults::default();
    let mut req = bare_request("hello");
    req.temperature = Some(0.2);
    req.reasoning_effort = Some(ReasoningEffort::Low);
    req.system_prompt = Some("be terse".to_string());
    req.history = Some(vec![Message::user("earlier")]);

    let prompt = req.into_prompt_request(&defaults);
    assert_eq!(prompt.temperature, 0.2);
    assert_eq!(prompt.reasoning_effort, ReasoningEffort::Low);
    assert_eq!(prompt.system_text.as_deref(), Some("be terse"));
    assert_eq!(prompt.prior_messages.len(), 1);
}

#[test]
fn generate_request_deserializes_history() {
    let req: GenerateRequest = serde_json::from_str(
        r#"{"prompt":"next","model":"o3","reasoning_effort":"high",
            "history":[{"role":"assistant","content":[{"type":"output_text","text":"prior"}]}]}"#,
    )
    .unwrap();
    assert_eq!(req.reasoning_effort, Some(ReasoningEffort::High));
    let history = req.history.unwrap();
    assert_eq!(history[0], Message::assistant("prior"));
}

#[test]
fn validators_reject_out_of_range() {
    assert!(validate_temperature(None).is_ok());
    assert!(validate_temperature(Some(2.0)).is_ok());
    assert!(validate_temperature(Some(2.1)).is_err());
    assert!(validate_temperature(Some(f64::NAN)).is_err());
    assert!(validate_top_p(Some(0.0)).is_ok());
    assert!(validate_top_p(Some(-0.1)).is_err());
    assert!(validate_max_output_tokens(Some(0)).is_err());
    assert!(validate_max_output_tokens(Some(1)).is_ok());

    let empty = Message {
        role: genbridge::message::Role::User,
        segments: vec![],
    };
    let err = validate_history(Some(&[Message::user("ok"), empty])).unwrap_err();
    assert!(err.contains("history[1]"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn file_config_overrides_defaults() {
    let file = FileConfig::parse(
        r#"
        base_url = "http://localhost:8080/v1"
        timeout_secs = 30

        [defaults]
        model = "o3-mini"
        reasoning_effort = "high"
        store = false
        "#,
    )
    .unwrap();

    let mut config = Config::default();
    config.apply_file(file);

    assert_eq!(config.base_url, "http://localhost:8080/v1");
    assert_eq!(config.timeout.as_secs(), 30);
    assert_eq!(config.defaults.model, "o3-mini");
    assert_eq!(config.defaults.reasoning_effort, ReasoningEffort::High);
    assert!(!config.defaults.store);
    // Unnamed fields keep their built-in defaults.
    assert_eq!(config.defaults.max_output_tokens, 2048);
}

#[test]
fn file_config_rejects_bad_enum() {
    assert!(FileConfig::parse("[defaults]\nreasoning_effort = \"extreme\"").is_err());
}

#[test]
fn config_debug_redacts_key() {
    let config = Config::default().with_api_key("sk-very-secret");
    let debug = format!("{config:?}");
    assert!(!debug.contains("sk-very-secret"));
    assert!(debug.contains("REDACTED"));
}

// ---------------------------------------------------------------------------
// Server identity
// ---------------------------------------------------------------------------

#[test]
fn server_identifies_as_genbridge() {
    let server = GenbridgeServer::new(Config::default());
    let info = server.get_info();
    assert_eq!(info.server_info.name, "genbridge");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(!server.registry().is_configured());
}
