//! HTTP application wiring (Axum router + shared services).
//!
//! - `services.rs`: store and workflow wiring, realtime broadcast
//! - `routes/`: handlers, one file per resource
//! - `dto.rs`: request bodies and JSON mapping helpers
//! - `errors.rs`: error type to `{"error", "code"}` responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
