use axum::{extract::State, routing::get, Json, Router};
use nursery_core::listing;
use nursery_shared::locale;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/settings/site", get(site_settings))
}

/// GET /api/settings/site
/// The stored record as-is; clients overlay it on their built-in defaults.
pub async fn site_settings(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    listing::site_settings(state.store.as_ref())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(locale::SETTINGS_LOAD_FAILED.to_string()))
}
