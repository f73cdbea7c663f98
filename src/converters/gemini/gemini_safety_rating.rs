use serde::{Deserialize, Serialize};
use crate::converters::gemini::{GeminiHarmCategory, GeminiHarmProbability};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiSafetyRating {
    pub category: GeminiHarmCategory,
    pub probability: GeminiHarmProbability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl GeminiSafetyRating {
    pub fn is_elevated(&self) -> bool {
        self.probability >= GeminiHarmProbability::Medium
    }
}

impl std::fmt::Display for GeminiSafetyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.category.name(), self.probability.name())
    }
}
