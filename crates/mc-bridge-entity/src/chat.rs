//! Flattening of JSON chat components to plain text for name tags.

use serde_json::Value;

/// Render a chat component as plain text.
///
/// Strings render as themselves; objects render `text` (or the raw
/// `translate` key) followed by their `extra` children; arrays concatenate.
/// Input that is not valid JSON is returned unchanged.
pub fn plain_text(json: &str) -> String {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => {
            let mut out = String::new();
            append_component(&value, &mut out);
            out
        }
        Err(_) => json.to_string(),
    }
}

fn append_component(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(parts) => {
            for part in parts {
                append_component(part, out);
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            } else if let Some(Value::String(key)) = map.get("translate") {
                out.push_str(key);
            }
            if let Some(Value::Array(extra)) = map.get("extra") {
                for part in extra {
                    append_component(part, out);
                }
            }
        }
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => {}
    }
}
