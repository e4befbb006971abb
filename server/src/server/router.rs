use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use super::{api, assets};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let max_upload = state.config().max_upload_bytes;

    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- QR generation ---
        .route("/api/qr", post(api::qr::generate_qr))
        .route("/api/qr/options", get(api::qr::get_options))
        // --- Form UI at / ---
        .route("/", get(assets::ui_index))
        .fallback(assets::ui_fallback)
        // --- Middleware ---
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
