use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeminiHarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
    HarmCategoryCivicIntegrity,
    #[serde(other)]
    HarmCategoryUnspecified,
}

impl GeminiHarmCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HarmCategoryUnspecified => "HARM_CATEGORY_UNSPECIFIED",
            Self::HarmCategoryHarassment => "HARM_CATEGORY_HARASSMENT",
            Self::HarmCategoryHateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            Self::HarmCategorySexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            Self::HarmCategoryDangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
            Self::HarmCategoryCivicIntegrity => "HARM_CATEGORY_CIVIC_INTEGRITY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_is_unspecified() {
        let c: GeminiHarmCategory = serde_json::from_str("\"HARM_CATEGORY_NEW\"").unwrap();
        assert_eq!(c, GeminiHarmCategory::HarmCategoryUnspecified);
        let c: GeminiHarmCategory = serde_json::from_str("\"HARM_CATEGORY_HATE_SPEECH\"").unwrap();
        assert_eq!(c.name(), "HARM_CATEGORY_HATE_SPEECH");
    }
}
