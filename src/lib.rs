pub mod api_error;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod converters;
pub mod gemini_client;
pub mod logging;
pub mod models;
pub mod prompts;
pub mod request_id;
pub mod router;
pub mod screenshot;
