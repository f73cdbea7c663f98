use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GeminiFinishReason {
    #[default]
    #[serde(rename = "FINISH_REASON_UNSPECIFIED")]
    FinishReasonUnspecified,
    #[serde(rename = "STOP")]
    Stop,
    #[serde(rename = "MAX_TOKENS")]
    MaxTokens,
    #[serde(rename = "SAFETY")]
    Safety,
    #[serde(rename = "RECITATION")]
    Recitation,
    #[serde(rename = "LANGUAGE")]
    Language,
    #[serde(rename = "BLOCKLIST")]
    Blocklist,
    #[serde(rename = "PROHIBITED_CONTENT")]
    ProhibitedContent,
    #[serde(rename = "SPII")]
    Spii,
    #[serde(rename = "MALFORMED_FUNCTION_CALL")]
    MalformedFunctionCall,
    #[serde(rename = "IMAGE_SAFETY")]
    ImageSafety,
    // Values this build does not know about land here
    #[serde(rename = "OTHER")]
    #[serde(other)]
    Other,
}

impl GeminiFinishReason {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FinishReasonUnspecified => "FINISH_REASON_UNSPECIFIED",
            Self::Stop => "STOP",
            Self::MaxTokens => "MAX_TOKENS",
            Self::Safety => "SAFETY",
            Self::Recitation => "RECITATION",
            Self::Language => "LANGUAGE",
            Self::Other => "OTHER",
            Self::Blocklist => "BLOCKLIST",
            Self::ProhibitedContent => "PROHIBITED_CONTENT",
            Self::Spii => "SPII",
            Self::MalformedFunctionCall => "MALFORMED_FUNCTION_CALL",
            Self::ImageSafety => "IMAGE_SAFETY",
        }
    }

    /// Generation ran to completion or hit the length cap.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Stop | Self::MaxTokens)
    }
}

impl std::fmt::Display for GeminiFinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_finish_reason_maps_to_other() {
        let reason: GeminiFinishReason = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(reason, GeminiFinishReason::Other);
    }

    #[test]
    fn test_known_finish_reasons() {
        let reason: GeminiFinishReason = serde_json::from_str("\"MAX_TOKENS\"").unwrap();
        assert_eq!(reason, GeminiFinishReason::MaxTokens);
        assert!(reason.is_success());
        let reason: GeminiFinishReason = serde_json::from_str("\"SPII\"").unwrap();
        assert!(!reason.is_success());
        assert_eq!(reason.to_string(), "SPII");
    }
}
