pub mod analyze;
pub mod translate;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use unsaid_schema::ErrorBody;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze::analyze))
        .route("/translate", post(translate::translate))
}

/// Short user-facing failure. Whatever actually went wrong has already been
/// logged; the client only sees the status and a plain-text `error` field.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
