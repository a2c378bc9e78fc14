use std::sync::Arc;

use mabi_market::{MarketConfig, PriceService, RestSource};

use mabi_market_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let mut builder = PriceService::builder();
    match MarketConfig::from_env().and_then(|cfg| RestSource::new(&cfg)) {
        Ok(source) => {
            tracing::info!("auction store source configured");
            builder = builder.source(Box::new(source));
        }
        Err(err) => {
            // Degraded mode is deliberate: lookups serve fallback data.
            tracing::warn!(error = %err, "running without a live source");
        }
    }

    let state = Arc::new(AppState {
        service: builder.build(),
    });

    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, mabi_market_api::app(state))
        .await
        .expect("server error");
}
