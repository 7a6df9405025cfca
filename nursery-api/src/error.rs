use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nursery_core::listing::ListingError;
use nursery_shared::locale;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Origin not allowed: {0}")]
    OriginRejected(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Listing(err) => {
                tracing::error!("Error fetching {}: {}", err.collection, err.source);
                (StatusCode::INTERNAL_SERVER_ERROR, err.collection.failure_message().to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            // Logged by the origin guard; the caller only learns it was refused.
            AppError::OriginRejected(_) => (StatusCode::FORBIDDEN, locale::ORIGIN_REJECTED.to_string()),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
