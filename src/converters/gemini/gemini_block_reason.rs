use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeminiBlockReason {
    BlockReasonUnspecified,
    Safety,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    #[serde(other)]
    Other,
}

impl GeminiBlockReason {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlockReasonUnspecified => "BLOCK_REASON_UNSPECIFIED",
            Self::Safety => "SAFETY",
            Self::Other => "OTHER",
            Self::Blocklist => "BLOCKLIST",
            Self::ProhibitedContent => "PROHIBITED_CONTENT",
            Self::ImageSafety => "IMAGE_SAFETY",
        }
    }
}
