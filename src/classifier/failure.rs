use crate::converters::gemini::{GeminiFinishReason, GeminiSafetyRating};
use thiserror::Error;

/// Why a generation response did not yield usable text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifiedFailure {
    #[error("Prompt blocked by safety filter: {reason}")]
    PromptBlocked {
        reason: String,
        safety_ratings: Vec<GeminiSafetyRating>,
    },
    #[error("Gemini API returned no candidates")]
    NoCandidates,
    #[error("Content generation stopped due to safety concerns in the response ({finish_reason})")]
    CandidateBlockedBySafety {
        finish_reason: GeminiFinishReason,
        safety_ratings: Vec<GeminiSafetyRating>,
    },
    #[error("Content generation stopped due to recitation policy ({finish_reason})")]
    CandidateBlockedByRecitation { finish_reason: GeminiFinishReason },
    #[error("Content generation failed for the candidate. Finish reason: {finish_reason}")]
    CandidateFailedOther { finish_reason: GeminiFinishReason },
    #[error(
        "Gemini API returned an empty response without parsable text content, despite no explicit blocking (finish reason: {finish_reason})"
    )]
    EmptyResponse { finish_reason: GeminiFinishReason },
}

impl ClassifiedFailure {
    /// Stable machine-readable identifier for error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ClassifiedFailure::PromptBlocked { .. } => "prompt_blocked",
            ClassifiedFailure::NoCandidates => "no_candidates",
            ClassifiedFailure::CandidateBlockedBySafety { .. } => "candidate_blocked_safety",
            ClassifiedFailure::CandidateBlockedByRecitation { .. } => "candidate_blocked_recitation",
            ClassifiedFailure::CandidateFailedOther { .. } => "candidate_failed",
            ClassifiedFailure::EmptyResponse { .. } => "empty_response",
        }
    }

    /// The upstream refused the content, as opposed to returning something unusable.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            ClassifiedFailure::PromptBlocked { .. }
                | ClassifiedFailure::CandidateBlockedBySafety { .. }
                | ClassifiedFailure::CandidateBlockedByRecitation { .. }
        )
    }

    pub fn finish_reason(&self) -> Option<GeminiFinishReason> {
        match self {
            ClassifiedFailure::CandidateBlockedBySafety { finish_reason, .. }
            | ClassifiedFailure::CandidateBlockedByRecitation { finish_reason }
            | ClassifiedFailure::CandidateFailedOther { finish_reason }
            | ClassifiedFailure::EmptyResponse { finish_reason } => Some(*finish_reason),
            ClassifiedFailure::PromptBlocked { .. } | ClassifiedFailure::NoCandidates => None,
        }
    }

    pub fn safety_ratings(&self) -> &[GeminiSafetyRating] {
        match self {
            ClassifiedFailure::PromptBlocked { safety_ratings, .. }
            | ClassifiedFailure::CandidateBlockedBySafety { safety_ratings, .. } => safety_ratings,
            _ => &[],
        }
    }
}
