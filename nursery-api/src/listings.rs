use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use nursery_core::listing;
use nursery_shared::locale;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/api/nurseries", get(list_nurseries))
        .route("/api/offers", get(list_offers))
        .route("/api/categories", get(list_categories))
        .route("/api/sponsors", get(list_sponsors))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "message": locale::HEALTH_MESSAGE }))
}

/// GET /api/nurseries
pub async fn list_nurseries(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(listing::list_nurseries(state.store.as_ref()).await?))
}

/// GET /api/offers
/// Published offers whose end date (if any) has not passed.
pub async fn list_offers(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(listing::list_offers(state.store.as_ref(), Utc::now()).await?))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(listing::list_categories(state.store.as_ref()).await?))
}

/// GET /api/sponsors
pub async fn list_sponsors(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(listing::list_sponsors(state.store.as_ref()).await?))
}
