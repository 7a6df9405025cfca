use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod listings;
pub mod middleware;
pub mod settings;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.origins);

    Router::new()
        .merge(listings::routes())
        .merge(settings::routes())
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::origin_guard_middleware))
        .layer(DefaultBodyLimit::max(state.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
