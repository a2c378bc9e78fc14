use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use mabi_market::config::{ENV_DB_KEY, ENV_DB_URL};

use crate::state::AppState;

/// GET /api/debug
///
/// Environment and configuration diagnostics. Reports variable presence
/// and lengths, never their values.
pub async fn get_debug(State(state): State<Arc<AppState>>) -> Response {
    let db_url = std::env::var(ENV_DB_URL).ok();
    let db_key = std::env::var(ENV_DB_KEY).ok();

    let body = json!({
        "environment": {
            "dbUrlSet": db_url.is_some(),
            "dbUrlLength": db_url.as_deref().map(str::len).unwrap_or(0),
            "dbKeySet": db_key.is_some(),
            "dbKeyLength": db_key.as_deref().map(str::len).unwrap_or(0),
        },
        "service": {
            "liveSourceConfigured": state.service.has_source(),
            "cachedItems": state.service.cached_items(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (
        [(header::CACHE_CONTROL, "no-store, max-age=0")],
        Json(body),
    )
        .into_response()
}
