use crate::converters::gemini::{GeminiBlockReason, GeminiSafetyRating};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<GeminiBlockReason>,
    #[serde(rename = "blockReasonMessage")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason_message: Option<String>,
    #[serde(rename = "safetyRatings")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_ratings: Vec<GeminiSafetyRating>,
}
