//! Headless server binary.

use tracing_subscriber::EnvFilter;

use polaroid_card_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting polaroid card server");

    let state = polaroid_card_lib::init_foundation()?;
    server::start_server(state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
        }
        tracing::info!("Shutting down...");
    })
    .await
}
