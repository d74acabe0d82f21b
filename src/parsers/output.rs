use serde_json::Value;

use crate::parsers::join_segments;

/// Reasoning-style `output: [...]`: the first assistant item with list
/// content. Reasoning items carry no role and are skipped.
pub fn assistant_item(body: &Value) -> Option<String> {
    let segments = body["output"]
        .as_array()?
        .iter()
        .find(|item| item["role"] == "assistant" && item["content"].is_array())?
        .get("content")?
        .as_array()?;
    Some(join_segments(segments, &["output_text"]))
}

/// Legacy `output: {content: "..."}`.
pub fn content_string(body: &Value) -> Option<String> {
    body.pointer("/output/content")?.as_str().map(str::to_string)
}

/// Legacy `output: {content: [...]}`.
pub fn content_segments(body: &Value) -> Option<String> {
    let segments = body.pointer("/output/content")?.as_array()?;
    Some(join_segments(segments, &["text", "output_text"]))
}
