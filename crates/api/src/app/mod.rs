//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record store + configuration shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: query/request DTOs and parsing helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use medstock_infra::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router backed by a fresh in-memory record store
/// (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    build_app_with(AppServices::in_memory(config))
}

/// Build the router around existing services (e.g. a pre-seeded store).
pub fn build_app_with(services: AppServices) -> Router {
    routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
