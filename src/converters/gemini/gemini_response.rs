use serde::{Deserialize, Serialize};

use crate::converters::gemini::{GeminiCandidate, GeminiPromptFeedback, GeminiUsage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiResponse {
    // Omitted by the API when the prompt itself is blocked
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
    /// Pre-assembled output, only present when an SDK or proxy layer fills it in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "usageMetadata")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<GeminiUsage>,
    #[serde(rename = "modelVersion")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(rename = "responseId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::gemini::{GeminiBlockReason, GeminiFinishReason, GeminiHarmProbability};

    #[test]
    fn test_parse_generate_content_response() {
        let text = r#"{"candidates": [{"content": {"parts": [{"text": "<div>ok</div>"}],"role": "model"},"finishReason": "STOP","index": 0,"safetyRatings": [{"category": "HARM_CATEGORY_HARASSMENT","probability": "NEGLIGIBLE"}]}],"usageMetadata": {"promptTokenCount": 165,"candidatesTokenCount": 49,"totalTokenCount": 214},"modelVersion": "gemini-2.0-flash","responseId": "iJDOaOzkBM70jMcPxJmmyAw"}"#;
        let resp: GeminiResponse = serde_json::from_str(text).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        let candidate = &resp.candidates[0];
        assert_eq!(candidate.finish_reason(), GeminiFinishReason::Stop);
        assert_eq!(candidate.safety_ratings[0].probability, GeminiHarmProbability::Negligible);
        assert_eq!(candidate.content.as_ref().unwrap().parts[0].as_text(), Some("<div>ok</div>"));
        assert!(resp.prompt_feedback.is_none());
        assert!(resp.text.is_none());
    }

    #[test]
    fn test_parse_blocked_prompt_without_candidates() {
        let text = r#"{"promptFeedback": {"blockReason": "SAFETY","safetyRatings": [{"category": "HARM_CATEGORY_DANGEROUS_CONTENT","probability": "HIGH"}]}}"#;
        let resp: GeminiResponse = serde_json::from_str(text).unwrap();
        assert!(resp.candidates.is_empty());
        let feedback = resp.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason, Some(GeminiBlockReason::Safety));
        assert_eq!(feedback.safety_ratings.len(), 1);
    }

    #[test]
    fn test_candidate_without_finish_reason_is_unspecified() {
        let text = r#"{"candidates": [{"content": {"parts": []}}]}"#;
        let resp: GeminiResponse = serde_json::from_str(text).unwrap();
        assert_eq!(resp.candidates[0].finish_reason(), GeminiFinishReason::FinishReasonUnspecified);
    }
}
