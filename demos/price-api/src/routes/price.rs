use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use mabi_market::{DataSource, PriceResponse};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    pub item_name: Option<String>,
}

/// GET /api/items/price?itemName=Silk
///
/// Always answers 200 with *a* price summary — live, cached, or fallback —
/// except when `itemName` is missing (400). The `dataSource` field and
/// `X-Data-Source` header say which branch produced the body.
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PriceParams>,
) -> Result<Response, AppError> {
    let item_name = match params.item_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(AppError::missing_item_name()),
    };

    let lookup = state.service.lookup(&item_name).await;
    let source = lookup.source;
    let response_time = format!("{}ms", lookup.query_time.as_millis());
    let body = PriceResponse::from(lookup);

    Ok((
        [
            (header::CACHE_CONTROL, cache_control(source)),
            (
                header::HeaderName::from_static("x-data-source"),
                source.label().to_string(),
            ),
            (
                header::HeaderName::from_static("x-response-time"),
                response_time,
            ),
        ],
        Json(body),
    )
        .into_response())
}

/// Live answers are the most cacheable; substitute data expires quickly
/// so clients re-ask once the store recovers.
fn cache_control(source: DataSource) -> String {
    match source {
        DataSource::Live => format!(
            "public, max-age={}, stale-while-revalidate=600",
            source.max_age_secs()
        ),
        _ => format!("public, max-age={}", source.max_age_secs()),
    }
}
