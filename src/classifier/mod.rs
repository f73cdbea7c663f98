//! Decides whether a Gemini `generateContent` response succeeded and pulls a
//! single clean text out of it.
//!
//! Rules run in a fixed order and the first match wins:
//! prompt block, direct text, missing candidates, first-candidate finish
//! reason, then text assembly from the first candidate's parts. Only the
//! first candidate is ever considered.

pub mod code_fence;
pub mod failure;

pub use code_fence::strip_code_fences;
pub use failure::ClassifiedFailure;

use crate::converters::gemini::{
    GeminiCandidate, GeminiFinishReason, GeminiPart, GeminiResponse, GeminiSafetyRating,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// The response's pre-assembled `text` field, returned as is.
    Direct,
    /// Concatenated from the first candidate's parts, fences stripped.
    Parts,
}

/// Outcome of a classification plus what the caller may want to report.
#[derive(Debug, Clone)]
pub struct Classification {
    pub outcome: Result<String, ClassifiedFailure>,
    pub source: Option<TextSource>,
    /// First-candidate ratings at MEDIUM or above, whether or not the candidate was accepted.
    pub elevated_ratings: Vec<GeminiSafetyRating>,
}

impl Classification {
    fn failed(failure: ClassifiedFailure, elevated_ratings: Vec<GeminiSafetyRating>) -> Self {
        Self { outcome: Err(failure), source: None, elevated_ratings }
    }

    fn succeeded(text: String, source: TextSource, elevated_ratings: Vec<GeminiSafetyRating>) -> Self {
        Self { outcome: Ok(text), source: Some(source), elevated_ratings }
    }
}

pub fn classify(response: &GeminiResponse) -> Result<String, ClassifiedFailure> {
    inspect(response).outcome
}

pub fn inspect(response: &GeminiResponse) -> Classification {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(block_reason) = feedback.block_reason {
            let reason = feedback
                .block_reason_message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(block_reason.name())
                .to_string();
            return Classification::failed(
                ClassifiedFailure::PromptBlocked {
                    reason,
                    safety_ratings: feedback.safety_ratings.clone(),
                },
                Vec::new(),
            );
        }
    }

    // Returned without fence stripping, unlike the parts path below.
    if let Some(text) = response.text.as_deref().filter(|t| !t.is_empty()) {
        return Classification::succeeded(text.to_string(), TextSource::Direct, Vec::new());
    }

    let Some(candidate) = response.candidates.first() else {
        return Classification::failed(ClassifiedFailure::NoCandidates, Vec::new());
    };

    let finish_reason = candidate.finish_reason();
    let elevated_ratings = elevated_ratings(candidate);

    if !finish_reason.is_success() {
        let failure = match finish_reason {
            GeminiFinishReason::Safety => ClassifiedFailure::CandidateBlockedBySafety {
                finish_reason,
                safety_ratings: candidate.safety_ratings.clone(),
            },
            GeminiFinishReason::Recitation => {
                ClassifiedFailure::CandidateBlockedByRecitation { finish_reason }
            }
            _ => ClassifiedFailure::CandidateFailedOther { finish_reason },
        };
        return Classification::failed(failure, elevated_ratings);
    }

    let assembled = assemble_text(candidate);
    if assembled.is_empty() {
        return Classification::failed(
            ClassifiedFailure::EmptyResponse { finish_reason },
            elevated_ratings,
        );
    }

    Classification::succeeded(strip_code_fences(&assembled), TextSource::Parts, elevated_ratings)
}

fn elevated_ratings(candidate: &GeminiCandidate) -> Vec<GeminiSafetyRating> {
    candidate
        .safety_ratings
        .iter()
        .filter(|r| r.is_elevated())
        .cloned()
        .collect()
}

fn assemble_text(candidate: &GeminiCandidate) -> String {
    candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(GeminiPart::as_text)
        .filter(|t| !t.is_empty())
        .collect()
}
