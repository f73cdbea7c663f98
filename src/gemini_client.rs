use crate::config::GeminiSettings;
use crate::converters::gemini::{GeminiRequest, GeminiResponse};
use crate::request_id::{REQUEST_ID_HEADER, RequestId};
use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("GEMINI_API_KEY is not configured.")]
    MissingApiKey,
    #[error("Failed to send request to Gemini API: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Gemini API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to parse Gemini API response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Thin `generateContent` caller. Timeouts and proxying belong to the shared
/// `reqwest::Client`; nothing is retried here.
#[derive(Debug)]
pub struct GeminiClient {
    http_client: Arc<reqwest::Client>,
}

impl GeminiClient {
    pub fn new(http_client: Arc<reqwest::Client>) -> Self {
        Self { http_client }
    }

    fn build_target_url(settings: &GeminiSettings, model: &str) -> String {
        let api_base = &settings.api_base;
        let path = format!("models/{}:generateContent", model);
        if api_base.ends_with('/') { format!("{}{}", api_base, path) } else { format!("{}/{}", api_base, path) }
    }

    pub async fn generate(
        &self,
        settings: &GeminiSettings,
        model: &str,
        request: &GeminiRequest,
        request_id: &RequestId,
    ) -> Result<GeminiResponse, UpstreamError> {
        if settings.api_key.trim().is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }

        let target_url = Self::build_target_url(settings, model);
        let mut target_request = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", settings.api_key.as_str());
        if let Some(val) = request_id.header_value() {
            target_request = target_request.header(REQUEST_ID_HEADER, val);
        }

        info!("Sending request to Gemini model '{}'", model);
        debug!(
            "request body: {}",
            serde_json::to_string(request).unwrap_or_else(|e| format!("<unserializable: {}>", e))
        );

        let response = target_request
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UpstreamError::Transport)?;
        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }
        debug!("raw response: {}", body);

        serde_json::from_str::<GeminiResponse>(&body).map_err(UpstreamError::Decode)
    }
}
