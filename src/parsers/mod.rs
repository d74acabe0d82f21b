pub mod choices;
pub mod output;

use serde_json::Value;

use crate::error::GenError;

/// A pure extraction strategy: `Some(text)` if the body has its shape.
pub type Extractor = fn(&Value) -> Option<String>;

/// Extraction strategies in precedence order. The backend has changed
/// envelope shape across model families; the first strategy that yields
/// non-empty text wins.
pub const EXTRACTORS: [(&str, Extractor); 5] = [
    ("choices_string", choices::message_string),
    ("choices_segments", choices::message_segments),
    ("output_items", output::assistant_item),
    ("output_string", output::content_string),
    ("output_segments", output::content_segments),
];

/// Normalize any supported response envelope into a single string.
pub fn extract_text(body: &Value) -> Result<String, GenError> {
    for (name, extractor) in EXTRACTORS {
        if let Some(text) = extractor(body).filter(|t| !t.is_empty()) {
            tracing::debug!(strategy = name, "extracted response text");
            return Ok(text);
        }
    }

    Err(GenError::UnrecognizedResponseShape(describe(body)))
}

/// Decode a raw body and extract its text.
pub fn parse(body: &[u8]) -> Result<String, GenError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        GenError::UnrecognizedResponseShape(format!("response is not valid JSON: {e}"))
    })?;
    extract_text(&value)
}

/// Texts of segments whose `type` is in `kinds`, newline-joined.
pub(crate) fn join_segments(segments: &[Value], kinds: &[&str]) -> String {
    segments
        .iter()
        .filter(|seg| seg["type"].as_str().is_some_and(|t| kinds.contains(&t)))
        .filter_map(|seg| seg["text"].as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short description of an unmatched body for diagnostics. Keys only, no
/// values, so nothing the model wrote ends up in logs.
fn describe(body: &Value) -> String {
    match body {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("no extractor matched; top-level keys: [{}]", keys.join(", "))
        }
        Value::Null => "no extractor matched; body is null".to_string(),
        Value::Array(_) => "no extractor matched; body is an array".to_string(),
        _ => "no extractor matched; body is a scalar".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_segments_keeps_order_and_filters_kind() {
        let segs = vec![
            json!({"type": "output_text", "text": "a"}),
            json!({"type": "reasoning", "text": "hidden"}),
            json!({"type": "output_text", "text": "b"}),
        ];
        assert_eq!(join_segments(&segs, &["output_text"]), "a\nb");
    }

    #[test]
    fn describe_lists_keys() {
        let msg = describe(&json!({"id": "x", "object": "thing"}));
        assert!(msg.contains("id"));
        assert!(msg.contains("object"));
    }
}
