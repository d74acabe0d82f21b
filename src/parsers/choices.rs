use serde_json::Value;

use crate::parsers::join_segments;

/// `choices[0].message.content` as a plain string.
pub fn message_string(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")?
        .as_str()
        .map(str::to_string)
}

/// `choices[0].message.content` as a list of typed segments.
pub fn message_segments(body: &Value) -> Option<String> {
    let segments = body.pointer("/choices/0/message/content")?.as_array()?;
    Some(join_segments(segments, &["output_text", "text"]))
}
