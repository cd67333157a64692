//! Message content extraction.
//!
//! Upstream chat transports deliver message content either as a bare
//! string or as an array of typed blocks. Both shapes deserialize into
//! [`Content`]; anything else extracts to an empty string.

use serde::Deserialize;
use serde_json::Value;

/// Message content as received from a chat transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Blocks(Vec<Block>),
    Other(Value),
}

/// One content block. Only blocks with `type: "text"` carry usable text.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Content {
    /// Parse a raw JSON value into content. Never fails; unrecognized
    /// shapes become [`Content::Other`].
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(Content::Other(value))
    }
}

/// Flatten content to plain text: strings are trimmed, text blocks are
/// trimmed and joined with a single space, everything else is ignored.
pub fn extract_text(content: &Content) -> String {
    match content {
        Content::Text(text) => text.trim().to_string(),
        Content::Blocks(blocks) => blocks
            .iter()
            .filter(|b| b.kind.as_deref() == Some("text"))
            .filter_map(|b| b.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Content::Other(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string() {
        let content = Content::from_value(json!("  hello there  "));
        assert_eq!(extract_text(&content), "hello there");
    }

    #[test]
    fn test_text_blocks_joined() {
        let content = Content::from_value(json!([
            { "type": "text", "text": " first " },
            { "type": "image", "source": "..." },
            { "type": "text", "text": "second" }
        ]));
        assert_eq!(extract_text(&content), "first second");
    }

    #[test]
    fn test_non_text_blocks_ignored() {
        let content = Content::from_value(json!([
            { "type": "tool_use", "name": "search" }
        ]));
        assert_eq!(extract_text(&content), "");
    }

    #[test]
    fn test_unknown_shapes_empty() {
        assert_eq!(extract_text(&Content::from_value(json!(42))), "");
        assert_eq!(extract_text(&Content::from_value(json!({"a": 1}))), "");
        assert_eq!(extract_text(&Content::from_value(Value::Null)), "");
    }

    #[test]
    fn test_empty_blocks() {
        let content = Content::from_value(json!([]));
        assert_eq!(extract_text(&content), "");
        let content = Content::from_value(json!([{ "type": "text", "text": "   " }]));
        assert_eq!(extract_text(&content), "");
    }
}
