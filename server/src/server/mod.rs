pub mod api;
pub mod router;

use std::future::Future;

use anyhow::Result;

use crate::app::SharedState;

/// Start the axum HTTP server and run until `shutdown` resolves.
pub async fn start_server(
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let port = state.server_port();
    let app = router::create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Polaroid card server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
