use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use outreach::config::Config;
use outreach::llm_client::LlmClient;
use outreach::mail::SmtpMailer;
use outreach::routes::build_router;
use outreach::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        &config.ollama_url,
        &config.ollama_model,
        config.llm_timeout_secs,
    )?;
    info!(
        "LLM client initialized (model: {} at {})",
        llm.model(),
        config.ollama_url
    );

    let mailer = Arc::new(SmtpMailer::new(&config.smtp)?);
    info!(
        "SMTP mailer initialized ({}:{})",
        config.smtp.host, config.smtp.port
    );

    if let Some(dir) = &config.upload_dir {
        info!("Archiving uploads to {}", dir.display());
    }

    let state = AppState {
        llm,
        mailer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the deployed frontend origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
