//! notekeep API server.

use tokio::net::TcpListener;
use tracing::info;

use notekeep_api::{build_router, build_state, config::ApiConfig, logging::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    let _log_guard = init_tracing(&config.log);
    info!(
        log_format = ?config.log.format,
        log_file = config.log.file.as_deref().unwrap_or("(stdout)"),
        storage = ?config.storage,
        "Logging initialized"
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let addr = config.bind_addr()?;
    info!("Starting server on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
