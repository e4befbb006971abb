//! Styled QR code generator — HTTP server entry point.

mod app;
mod config;
mod server;

use tracing_subscriber::EnvFilter;

use app::SharedState;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load();
    let state = SharedState::new(config);

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tracing::info!(
        port = state.config().server_port,
        "QR studio running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    state.shutdown_token().cancel();
    let _ = server_handle.await;
    Ok(())
}
