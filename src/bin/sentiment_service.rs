//! Sentiment service - standalone sentiment analysis microservice

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealerhub::{config::Config, sentiment::service};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentiment_service=info,dealerhub=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sentiment service...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;

    // Build router
    let app = service::build_router();

    // Start server
    let addr = format!("{}:{}", config.sentiment.host, config.sentiment.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Sentiment service listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
