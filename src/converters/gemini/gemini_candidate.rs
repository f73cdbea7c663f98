use crate::converters::gemini::{GeminiContent, GeminiFinishReason, GeminiSafetyRating};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<GeminiFinishReason>,
    #[serde(rename = "safetyRatings")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_ratings: Vec<GeminiSafetyRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl GeminiCandidate {
    /// Absent on the wire means the API did not say why generation stopped.
    pub fn finish_reason(&self) -> GeminiFinishReason {
        self.finish_reason.unwrap_or_default()
    }
}
