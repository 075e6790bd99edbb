use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Scrape endpoint on the configured path, plus the landing page and a
/// liveness check.
pub fn create_routes(state: AppState) -> Router {
    let metrics_path = state.metrics_path.to_string();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route(&metrics_path, get(handlers::get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
