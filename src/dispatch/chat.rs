use serde::Serialize;

use crate::dispatch::PromptRequest;

pub const CHAT_PATH: &str = "/chat/completions";

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Build the chat body: optional system turn, prior turns flattened to
/// plain strings, then the new user turn.
pub fn build_payload(req: &PromptRequest) -> ChatPayload {
    let mut messages = Vec::with_capacity(req.prior_messages.len() + 2);

    if let Some(sys) = req.system_text() {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: sys.to_string(),
        });
    }

    messages.extend(req.prior_messages.iter().map(|m| ChatMessage {
        role: m.role.as_str().to_string(),
        content: m.flattened_text(),
    }));

    messages.push(ChatMessage {
        role: "user".to_string(),
        content: req.user_text.clone(),
    });

    ChatPayload {
        model: req.model.clone(),
        messages,
        temperature: req.temperature,
        max_tokens: req.max_output_tokens,
        top_p: req.top_p,
    }
}
