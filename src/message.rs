use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Author of a conversation turn. Backend-agnostic: the reasoning payload
/// renames `System` on the way out, nothing else does.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Whether a segment was authored as model input or model output.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum SegmentKind {
    #[serde(rename = "input_text", alias = "input")]
    Input,
    #[serde(rename = "output_text", alias = "output")]
    Output,
}

impl SegmentKind {
    /// Wire tag used by the reasoning endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input_text",
            Self::Output => "output_text",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub text: String,
}

/// One prior conversation turn.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    #[serde(rename = "content")]
    pub segments: Vec<Segment>,
}

impl Message {
    /// Single-segment message. Assistant turns are output text, everything
    /// else is input text.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        let kind = match role {
            Role::Assistant => SegmentKind::Output,
            Role::System | Role::User => SegmentKind::Input,
        };
        Self::with_kind(role, text, kind)
    }

    pub fn with_kind(role: Role, text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            role,
            segments: vec![Segment {
                kind,
                text: text.into(),
            }],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Segment texts in source order, newline-joined.
    pub fn flattened_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
