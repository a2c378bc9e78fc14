//! Axum application serving auction-market price data.
//!
//! Router construction lives here so integration tests can drive the app
//! without binding a socket.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router over shared state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "mabi-market price API" }))
        .route("/api/items/price", get(routes::price::get_price))
        .route("/api/items/profit", get(routes::profit::get_profit))
        .route("/api/debug", get(routes::debug::get_debug))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
