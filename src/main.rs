//! DealerHub - car dealership web platform

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealerhub::{
    api::{self, AppState},
    clients::{DealerApi, DealerClient, SentimentApi, SentimentClient},
    config::Config,
    db::{
        self,
        repositories::{SqlxCarRepository, SqlxSessionRepository, SqlxUserRepository},
    },
    services::{CarService, ReviewService, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealerhub=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DealerHub...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let car_repo = SqlxCarRepository::boxed(pool.clone());

    // Outbound gateways
    let dealer: Arc<dyn DealerApi> = Arc::new(DealerClient::new(config.backend.url.clone()));
    let sentiment: Arc<dyn SentimentApi> =
        Arc::new(SentimentClient::new(config.sentiment.url.clone()));
    tracing::info!(
        "Dealer backend at {}, sentiment service at {}",
        config.backend.url,
        config.sentiment.url
    );

    // Initialize services
    let user_service = Arc::new(UserService::new(user_repo, session_repo));
    let car_service = Arc::new(CarService::new(car_repo));
    let review_service = Arc::new(ReviewService::new(dealer.clone(), sentiment));

    // Build application state
    let state = AppState {
        user_service: user_service.clone(),
        car_service,
        review_service,
        dealer,
    };

    // Purge expired sessions periodically (runs every hour)
    {
        let user_service = user_service.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(3600));
            loop {
                interval.tick().await;
                match user_service.purge_expired_sessions().await {
                    Ok(removed) if removed > 0 => {
                        tracing::debug!("Purged {} expired session(s)", removed)
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Session purge failed: {}", e),
                }
            }
        });
    }

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
