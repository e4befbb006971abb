//! Static file serving for the embedded form UI.

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "ui/"]
struct UiAssets;

/// Serve the form page for bare `/` requests.
pub async fn ui_index() -> Response {
    serve_embedded("index.html")
}

/// Fallback handler: serve UI assets for unmatched paths.
/// Uses `Uri` instead of `Path` because fallback has no capture parameter.
pub async fn ui_fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    const API_PREFIXES: [&str; 2] = ["/api", "/status"];

    API_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn serve_embedded(path: &str) -> Response {
    match UiAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
