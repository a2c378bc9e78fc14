use mabi_market::PriceService;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The price lookup service: query layer, cache, fallback, and retry
    /// policy wired together. `None` source inside means the connection
    /// config was missing at startup and every lookup serves fallback data.
    pub service: PriceService,
}
