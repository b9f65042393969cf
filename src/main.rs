use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use carm_api_rust::{
    auth::JwtManager,
    config::Config,
    constants::API_NAME,
    handlers,
    metrics::HttpMetrics,
    repository::{CarRepository, EngineRepository},
    service::{CarService, EngineService},
    state::AppState,
    telemetry,
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let telemetry = telemetry::init(&config)?;

    tracing::info!("{} Starting car management API on port {}", API_NAME, config.server_port);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("{} Connected to database", API_NAME);

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply database schema")?;

    let engine_service = EngineService::new(Arc::new(EngineRepository::new(pool.clone())));
    let car_service = CarService::new(Arc::new(CarRepository::new(pool.clone())));
    let metrics = HttpMetrics::new().context("Failed to register metrics")?;

    let state = AppState::new(
        car_service,
        engine_service,
        JwtManager::new(&config.jwt_secret),
        Arc::new(metrics),
    );
    let app = handlers::app(state, Duration::from_secs(config.request_timeout_secs));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} Shutting down", API_NAME);
    pool.close().await;
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("{} Failed to listen for ctrl-c: {}", API_NAME, e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("{} Failed to listen for SIGTERM: {}", API_NAME, e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
