use serde::{Deserialize, Serialize};

use crate::converters::gemini::{
    GeminiContent, GeminiGenerationConfig, GeminiInlineData, GeminiPart,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Single user turn carrying only a text prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::from_parts(vec![GeminiPart::text(prompt)])
    }

    /// Image first, then the instructions that refer to it.
    pub fn from_prompt_and_image(prompt: impl Into<String>, mime_type: impl Into<String>, base64_data: String) -> Self {
        Self::from_parts(vec![
            GeminiPart::InlineData {
                inline_data: GeminiInlineData { mime_type: mime_type.into(), data: base64_data },
            },
            GeminiPart::text(prompt),
        ])
    }

    /// Applies the configured sampling knobs; `None` leaves the model default.
    pub fn with_sampling(mut self, temperature: Option<f64>, max_output_tokens: Option<u32>) -> Self {
        let config = self.generation_config.get_or_insert_with(Default::default);
        config.temperature = temperature;
        config.max_output_tokens = max_output_tokens;
        self
    }

    fn from_parts(parts: Vec<GeminiPart>) -> Self {
        GeminiRequest {
            contents: vec![GeminiContent::user(parts)],
            generation_config: Some(GeminiGenerationConfig {
                response_mime_type: Some("text/plain".to_string()),
                ..Default::default()
            }),
        }
    }
}
