use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::AppError;
use crate::state::AppState;

/// Exact-match allow-list of browser origins.
#[derive(Debug, Clone)]
pub struct AllowedOrigins(Arc<[String]>);

impl AllowedOrigins {
    pub fn new(origins: impl IntoIterator<Item = String>) -> Self {
        Self(origins.into_iter().collect())
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed.as_bytes() == origin.as_bytes())
    }

    fn header_values(&self) -> Vec<HeaderValue> {
        self.0
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring unusable allowed origin {:?}", origin);
                    None
                }
            })
            .collect()
    }
}

/// Response headers for allowed origins, including preflight answers.
pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.header_values()))
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// ============================================================================
// Origin Guard Middleware
// ============================================================================

/// Refuses browser requests from origins outside the allow-list before they
/// reach any handler. Requests without an `Origin` header (same-origin pages,
/// curl, server-to-server) pass.
pub async fn origin_guard_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match req.headers().get(header::ORIGIN) {
        Some(origin) if !state.origins.allows(origin) => {
            let origin = String::from_utf8_lossy(origin.as_bytes()).into_owned();
            tracing::warn!("Blocked by CORS: {}", origin);
            Err(AppError::OriginRejected(origin))
        }
        _ => Ok(next.run(req).await),
    }
}
