use crate::api_error::ApiError;
use crate::auth::{self, AppState};
use crate::classifier::{self, TextSource};
use crate::config::GeminiSettings;
use crate::converters::gemini::GeminiRequest;
use crate::models::{GenerateQuery, GeneratedText, HealthStatus, ScreenshotUpload};
use crate::prompts;
use crate::request_id::{self, RequestId};
use crate::screenshot::{Screenshot, ScreenshotError};
use axum::{
    Extension, Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, Query, State, rejection::JsonRejection},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", get(generate))
        .route(
            "/upload_screenshot",
            post(upload_screenshot)
                .layer(DefaultBodyLimit::disable())
                .layer(middleware::from_fn_with_state(state.clone(), limit_upload_body)),
        )
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_authorization,
        ))
        .layer(middleware::from_fn(request_id::inject_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Buffers the body against `server.max_upload_bytes` as currently configured,
/// so a reloaded limit applies to the next upload.
pub async fn limit_upload_body(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.read().await.server.max_upload_bytes;
    let (parts, body) = request.into_parts();
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Err(e) => {
            info!("Rejected upload body over {} bytes: {}", limit, e);
            ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "invalid_request_error",
                "payload_too_large",
                format!("Request body exceeds the {} byte upload limit", limit),
            )
            .into_response()
        }
    }
}

#[axum_macros::debug_handler]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy".to_string() })
}

#[axum_macros::debug_handler(state = AppState)]
pub async fn generate(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<GenerateQuery>,
) -> Response {
    let Some(input) = query.prompt.filter(|p| !p.trim().is_empty()) else {
        return ApiError::invalid_request("missing_prompt", "Missing 'prompt' query parameter")
            .into_response();
    };

    let settings = state.config.read().await.gemini.clone();
    info!("/generate called with {} bytes of page description", input.len());
    let request = GeminiRequest::from_prompt(prompts::render_text_review(&input))
        .with_sampling(settings.temperature, settings.max_output_tokens);
    run_review(&state, &settings, &settings.model, &request, &request_id).await
}

#[axum_macros::debug_handler(state = AppState)]
pub async fn upload_screenshot(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    upload: Result<Json<ScreenshotUpload>, JsonRejection>,
) -> Response {
    let upload = match upload {
        Ok(Json(upload)) => upload,
        Err(rejection) => {
            info!("Rejected screenshot request body: {}", rejection.body_text());
            return ApiError::from(&rejection).into_response();
        }
    };
    let screenshot = match upload
        .screenshot
        .as_deref()
        .ok_or(ScreenshotError::Missing)
        .and_then(Screenshot::from_data_url)
    {
        Ok(s) => s,
        Err(e) => {
            info!("Rejected screenshot upload: {}", e);
            return ApiError::from(&e).into_response();
        }
    };

    let (settings, screenshot_path) = {
        let config = state.config.read().await;
        (config.gemini.clone(), config.server.screenshot_path.clone())
    };

    if let Some(path) = screenshot_path {
        // best effort
        match screenshot.save(Path::new(&path)).await {
            Ok(()) => debug!("Saved screenshot to {}", path),
            Err(e) => warn!("Failed to save screenshot to {}: {}", path, e),
        }
    }

    info!(
        "/upload_screenshot called with {} image of {} bytes",
        screenshot.mime_type,
        screenshot.bytes.len()
    );
    let request = GeminiRequest::from_prompt_and_image(
        prompts::SCREENSHOT_REVIEW_TEMPLATE,
        screenshot.mime_type,
        screenshot.encoded,
    )
    .with_sampling(settings.temperature, settings.max_output_tokens);
    run_review(&state, &settings, &settings.vision_model, &request, &request_id).await
}

async fn run_review(
    state: &AppState,
    settings: &GeminiSettings,
    model: &str,
    request: &GeminiRequest,
    request_id: &RequestId,
) -> Response {
    let response = match state
        .gemini_client
        .generate(settings, model, request, request_id)
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            error!("Gemini API interaction failed: {}", e);
            return ApiError::from(&e).into_response();
        }
    };

    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Token usage: prompt={:?} candidates={:?} total={:?}",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }

    let classification = classifier::inspect(&response);
    for rating in &classification.elevated_ratings {
        warn!("Candidate safety issue: {}", rating);
    }

    match classification.outcome {
        Ok(text) => {
            let source = match classification.source {
                Some(TextSource::Direct) => "direct text",
                _ => "candidate parts",
            };
            info!("Generated text via {}, length {}", source, text.len());
            Json(GeneratedText { generated_text: text }).into_response()
        }
        Err(failure) => {
            for rating in failure.safety_ratings() {
                warn!("Safety rating: {}", rating);
            }
            warn!(
                finish_reason = ?failure.finish_reason(),
                "Generation rejected ({}): {}",
                failure.code(),
                failure
            );
            ApiError::from(&failure).into_response()
        }
    }
}
