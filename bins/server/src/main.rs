//! Meridian API Server
//!
//! Main entry point for the Meridian demo banking backend.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_api::{AppState, create_router};
use meridian_core::seed::{DEMO_EMAIL, seed_demo_data};
use meridian_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create application state (all in-memory; nothing survives a restart)
    let state = AppState::new();

    // Load the demo dataset
    if config.demo.seed {
        seed_demo_data(
            &state.users,
            &state.ledger,
            &state.cards,
            &state.goals,
            &state.beneficiaries,
        )?;
        info!(email = DEMO_EMAIL, "Demo dataset loaded");
    }

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
