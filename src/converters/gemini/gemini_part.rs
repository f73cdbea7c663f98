use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::converters::gemini::GeminiInlineData;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    // functionCall, executableCode and friends; kept opaque
    Other(Value),
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        GeminiPart::Text { text: text.into(), thought: None }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            GeminiPart::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parts() {
        let parts: Vec<GeminiPart> = serde_json::from_str(
            r#"[{"text":"hi"},{"inlineData":{"mimeType":"image/png","data":"AAAA"}},{"functionCall":{"name":"f","args":{}}}]"#,
        )
        .unwrap();
        assert_eq!(parts[0].as_text(), Some("hi"));
        assert!(matches!(parts[1], GeminiPart::InlineData { .. }));
        assert!(matches!(parts[2], GeminiPart::Other(_)));
        assert_eq!(parts[2].as_text(), None);
    }
}
