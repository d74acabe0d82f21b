use serde::Serialize;

use crate::dispatch::PromptRequest;
use crate::message::{Message, Role, Segment, SegmentKind};

pub const REASONING_PATH: &str = "/responses";

/// Request body for the reasoning (responses) endpoint.
/// No temperature or top_p: the endpoint rejects them for these models.
#[derive(Debug, Serialize)]
pub struct ReasoningPayload {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub text: TextOptions,
    pub reasoning: ReasoningOptions,
    pub tools: Vec<serde_json::Value>,
    pub store: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InputMessage {
    pub role: &'static str,
    pub content: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct TextOptions {
    pub format: TextFormat,
}

#[derive(Debug, Serialize)]
pub struct TextFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReasoningOptions {
    pub effort: &'static str,
    pub summary: &'static str,
}

/// Role name as the reasoning endpoint expects it.
pub fn wire_role(role: Role) -> &'static str {
    match role {
        Role::System => "developer",
        other => other.as_str(),
    }
}

fn to_input(message: &Message) -> InputMessage {
    InputMessage {
        role: wire_role(message.role),
        content: message.segments.clone(),
    }
}

/// Build the reasoning body. Segment structure is kept as-is; only the role
/// name changes, and only here.
pub fn build_payload(req: &PromptRequest) -> ReasoningPayload {
    let mut input = Vec::with_capacity(req.prior_messages.len() + 2);

    if let Some(sys) = req.system_text() {
        input.push(to_input(&Message::with_kind(
            Role::System,
            sys,
            SegmentKind::Input,
        )));
    }

    input.extend(req.prior_messages.iter().map(to_input));

    input.push(to_input(&Message::with_kind(
        Role::User,
        req.user_text.as_str(),
        SegmentKind::Input,
    )));

    ReasoningPayload {
        model: req.model.clone(),
        input,
        text: TextOptions {
            format: TextFormat {
                format_type: "text",
            },
        },
        reasoning: ReasoningOptions {
            effort: req.reasoning_effort.as_str(),
            summary: req.reasoning_summary.as_str(),
        },
        tools: Vec::new(),
        store: req.store,
    }
}
