use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app::SharedState;
use super::api;


/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let upload_limit = state.config().max_upload_bytes;
    Router::new()
        .route("/status", get(status_handler))
        .route("/api/messages", get(api::messages::get_messages))
        .route(
            "/api/cards",
            post(api::cards::create_card).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
