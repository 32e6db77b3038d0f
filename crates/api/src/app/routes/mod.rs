use axum::{routing::get, Router};

pub mod alerts;
pub mod dashboard;
pub mod inventory;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/dashboard/stats", get(dashboard::get_stats))
        .route("/api/alerts", get(alerts::get_alerts))
        .merge(inventory::router())
}
