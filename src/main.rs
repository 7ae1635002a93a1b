/// Main application entry point
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod jobs;
mod repo;
mod routes;
mod services;
mod utils;

use crate::clients::AirVisualClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::jobs::AirQualityJob;
use crate::repo::{init_db, AirQualityRepo};
use crate::routes::build_router;
use crate::services::AirQualityService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(env = %config.env, "Configuration loaded successfully");

    // Initialize database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.pool_size)
        .connect_with(config.database.connect_options())
        .await?;
    info!("Database connection pool established");

    // Initialize database schema
    init_db(&pool).await?;
    info!("Database schema initialized");

    // Explicit composition: repo and client into the service, service into
    // the handlers and the ingestion job
    let repo = AirQualityRepo::new(pool);
    let client = AirVisualClient::new(config.air_quality.clone())?;
    let service = Arc::new(AirQualityService::new(repo, client));

    let state = AppState {
        air_quality_service: service.clone(),
    };

    // Start the ingestion job with a cooperative shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let job_handle = AirQualityJob::new(service).spawn(shutdown_rx);

    // Build router and start server
    let app = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("airq-service listening on {addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the job and wait for an in-flight firing to finish
    let _ = shutdown_tx.send(true);
    let _ = job_handle.await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
