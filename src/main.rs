use clap::Parser;
use design_review_server::config::{self, Config};
use design_review_server::{auth, gemini_client, logging, router};
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, mpsc};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "design-review-server")]
#[command(about = "Security design reviews of web screens backed by the Gemini API")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Path to a YAML config file; defaults plus GEMINI_API_KEY when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Require this bearer token (or x-api-key) on every route but /health
    #[arg(short, long)]
    token: Option<String>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file, capped at 10 MiB
    #[arg(long)]
    log_file: Option<String>,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,

    /// Timeout for a single Gemini API call
    #[arg(long, default_value = "120")]
    timeout_secs: u64,
}

async fn watch_config_file(config_path: &str, config: &Arc<RwLock<Config>>) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel(100);

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            if let Err(e) = tx.blocking_send(event) {
                eprintln!("Failed to send event: {}", e);
            }
        }
    })?;

    watcher.watch(Path::new(config_path), RecursiveMode::NonRecursive)?;

    while let Some(event) = rx.recv().await {
        if let EventKind::Modify(_) = event.kind {
            info!("Config file modified, attempting to reload");
            match Config::from_file(config_path) {
                Ok(new_config) => {
                    if new_config.gemini.api_key.is_empty() {
                        warn!("Reloaded configuration has no Gemini API key");
                    }
                    *config.write().await = new_config;
                    info!("Configuration reloaded successfully");
                }
                Err(e) => {
                    error!("Failed to reload configuration: {:#}", e);
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_logging(logging::parse_level(&args.log_level), args.log_file.as_deref());

    let config = Config::load(args.config.as_deref())?;
    match &args.config {
        Some(path) => info!("Configuration loaded successfully from: {}", path),
        None => info!("No config file given, using defaults"),
    }
    if config.gemini.api_key.is_empty() {
        warn!(
            "{} is not set and the config has no api_key; /generate and /upload_screenshot will fail until it is configured",
            config::API_KEY_ENV
        );
    }
    let config = Arc::new(RwLock::new(config));

    if let Some(config_path) = args.config.clone() {
        let config_for_watcher = config.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_config_file(&config_path, &config_for_watcher).await {
                warn!("Config file watcher error: {}", e);
            }
        });
    }

    let mut client_builder = reqwest::Client::builder().timeout(Duration::from_secs(args.timeout_secs));
    if let Some(proxy) = &args.proxy {
        client_builder = client_builder.proxy(reqwest::Proxy::all(proxy)?);
    }
    let http_client = Arc::new(client_builder.build()?);
    let gemini_client = Arc::new(gemini_client::GeminiClient::new(http_client));

    let app_state = auth::AppState::new(config, args.token, gemini_client);
    let app = router::build_router(app_state);

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server started on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
