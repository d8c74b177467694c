mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod statement;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::statement::generator::GeminiStatementGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Statement API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini.clone())?;
    info!(
        "LLM client initialized (model: {}, url_context: {}, timeout: {}s)",
        llm.model(),
        llm.url_context_enabled(),
        config.gemini.timeout.as_secs()
    );

    let state = AppState {
        generator: Arc::new(GeminiStatementGenerator::new(llm)),
        statement: config.statement.clone(),
    };
    info!(
        "Statement form fields: job='{}' references='{}' cv='{}', sanitize_output={}",
        state.statement.job_field,
        state.statement.reference_field,
        state.statement.cv_field,
        state.statement.sanitize_output
    );

    if config.cors_origins.is_empty() {
        info!("CORS: any origin");
    } else {
        info!("CORS: {}", config.cors_origins.join(", "));
    }

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
