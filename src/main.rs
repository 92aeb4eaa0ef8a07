mod action_router;
mod aggregators;
pub mod api;
mod ingestion;
mod market_clock;
mod market_symbol;
pub mod schema;
pub mod utils;

use axum::{routing::get, Router};
use dotenvy::dotenv;
use std::env;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use api::handlers::{health, market_symbols::get_market_symbol};
use ingestion::config::IngestionConfig;
use utils::app_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    let app_config = AppConfig::from_env()?;
    tracing::info!("Application configuration loaded successfully");

    // Candle ingestion runs on its own clock; the first tick fires at startup
    let ingestion_config = IngestionConfig::from_env()?;
    tokio::spawn(ingestion::scheduler::run_ingestion_loop(
        app_config.clone(),
        ingestion_config,
    ));

    // Build router with all routes
    let router = Router::new()
        // Health check - public endpoint
        .route("/health", get(health::health))
        // Aggregated symbol history for the dashboard
        .route("/MarketSymbol/:symbol", get(get_market_symbol))
        // Add middleware layers before state binding
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // the dashboard is served from another origin
        // Shared state - applied after middleware
        .with_state(app_config);

    // Get port from environment or use default
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8090".to_string())
        .parse::<u16>()
        .unwrap_or(8090);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Starting Coindash API server on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
