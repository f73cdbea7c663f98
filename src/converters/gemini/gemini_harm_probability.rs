use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeminiHarmProbability {
    Negligible,
    Low,
    Medium,
    High,
    #[serde(other)]
    HarmProbabilityUnspecified,
}

impl GeminiHarmProbability {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HarmProbabilityUnspecified => "HARM_PROBABILITY_UNSPECIFIED",
            Self::Negligible => "NEGLIGIBLE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Unspecified ranks below every real level.
    pub fn severity(&self) -> u8 {
        match self {
            Self::HarmProbabilityUnspecified => 0,
            Self::Negligible => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
        }
    }
}

impl PartialOrd for GeminiHarmProbability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeminiHarmProbability {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_ordering() {
        assert!(GeminiHarmProbability::Negligible < GeminiHarmProbability::Low);
        assert!(GeminiHarmProbability::Low < GeminiHarmProbability::Medium);
        assert!(GeminiHarmProbability::High >= GeminiHarmProbability::Medium);
        assert!(GeminiHarmProbability::HarmProbabilityUnspecified < GeminiHarmProbability::Negligible);
        assert!(GeminiHarmProbability::HarmProbabilityUnspecified < GeminiHarmProbability::Medium);
    }

    #[test]
    fn test_unknown_probability_is_unspecified() {
        let p: GeminiHarmProbability = serde_json::from_str("\"EXTREME\"").unwrap();
        assert_eq!(p, GeminiHarmProbability::HarmProbabilityUnspecified);
        let p: GeminiHarmProbability = serde_json::from_str("\"HARM_PROBABILITY_UNSPECIFIED\"").unwrap();
        assert_eq!(p, GeminiHarmProbability::HarmProbabilityUnspecified);
        let p: GeminiHarmProbability = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(p, GeminiHarmProbability::Medium);
    }
}
