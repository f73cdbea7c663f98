use crate::classifier::ClassifiedFailure;
use crate::gemini_client::UpstreamError;
use crate::models::{ErrorDetail, ErrorResponse};
use crate::screenshot::ScreenshotError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// An error payload in the `{"error": {message, type, code}}` shape together
/// with the status it is sent with.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub r#type: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, r#type: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, r#type, code, message: message.into() }
    }

    pub fn invalid_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request_error", code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                message: self.message,
                r#type: self.r#type.to_string(),
                code: Some(self.code.to_string()),
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<&ClassifiedFailure> for ApiError {
    fn from(failure: &ClassifiedFailure) -> Self {
        // Refusals are about the content; everything else is a bad upstream answer.
        let status = if failure.is_block() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_GATEWAY
        };
        ApiError::new(status, "generation_error", failure.code(), failure.to_string())
    }
}

impl From<&UpstreamError> for ApiError {
    fn from(err: &UpstreamError) -> Self {
        match err {
            UpstreamError::MissingApiKey => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                "missing_api_key",
                err.to_string(),
            ),
            UpstreamError::Transport(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "api_error", "request_failed", err.to_string())
            }
            UpstreamError::Status { .. } => {
                ApiError::new(StatusCode::BAD_GATEWAY, "api_error", "upstream_error", err.to_string())
            }
            UpstreamError::Decode(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "api_error", "parse_error", err.to_string())
            }
        }
    }
}

impl From<&ScreenshotError> for ApiError {
    fn from(err: &ScreenshotError) -> Self {
        ApiError::invalid_request("invalid_image", err.to_string())
    }
}

impl From<&JsonRejection> for ApiError {
    fn from(rejection: &JsonRejection) -> Self {
        let status = rejection.status();
        let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "payload_too_large"
        } else {
            "invalid_json"
        };
        ApiError::new(status, "invalid_request_error", code, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::gemini::GeminiFinishReason;

    #[test]
    fn test_blocks_map_to_unprocessable() {
        let err = ApiError::from(&ClassifiedFailure::CandidateBlockedBySafety {
            finish_reason: GeminiFinishReason::Safety,
            safety_ratings: Vec::new(),
        });
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "candidate_blocked_safety");
    }

    #[test]
    fn test_unusable_answers_map_to_bad_gateway() {
        for failure in [
            ClassifiedFailure::NoCandidates,
            ClassifiedFailure::CandidateFailedOther { finish_reason: GeminiFinishReason::Other },
            ClassifiedFailure::EmptyResponse { finish_reason: GeminiFinishReason::Stop },
        ] {
            assert_eq!(ApiError::from(&failure).status, StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn test_missing_key_is_server_error() {
        let err = ApiError::from(&UpstreamError::MissingApiKey);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "GEMINI_API_KEY is not configured.");
    }
}
