use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": ..., "code": ...}`
/// response with an appropriate HTTP status code. Error responses are
/// never cacheable.
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn missing_item_name() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "MISSING_ITEM_NAME",
            message: "itemName query parameter is required".to_string(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_SERVER_ERROR",
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CACHE_CONTROL, "no-store, max-age=0")],
            Json(json!({ "error": self.message, "code": self.code })),
        )
            .into_response()
    }
}
