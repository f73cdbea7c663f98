use crate::api_error::ApiError;
use crate::config::Config;
use crate::gemini_client::GeminiClient;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub token: Option<String>,
    pub gemini_client: Arc<GeminiClient>,
}

impl AppState {
    pub fn new(config: Arc<RwLock<Config>>, token: Option<String>, gemini_client: Arc<GeminiClient>) -> Self {
        // An empty --token means no auth, same as not passing one
        let token = token.filter(|t| !t.trim().is_empty());
        Self { config, token, gemini_client }
    }
}

/// `Authorization: Bearer <token>` or `x-api-key: <token>`.
fn provided_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|hv| hv.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .or_else(|| headers.get("x-api-key").and_then(|hv| hv.to_str().ok()))
}

pub async fn require_authorization(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = app_state.token.as_deref() else {
        return next.run(request).await;
    };
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    match provided_token(request.headers()) {
        None => {
            info!("Missing Authorization header");
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                "invalid_request_error",
                "missing_auth_header",
                "Authorization header is required",
            )
            .into_response()
        }
        Some(token) if token != expected => {
            info!("Invalid token provided");
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                "invalid_request_error",
                "invalid_token",
                "Invalid authentication token",
            )
            .into_response()
        }
        Some(_) => {
            debug!("Token validation successful");
            next.run(request).await
        }
    }
}
