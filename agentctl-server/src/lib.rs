//! Agent control validators - HTTP API
//!
//! Serves the AIP-1 certificate validator, the CTX-1 capability check and
//! the schema-backed ADP-1 / PVS-1 / manifest validators over HTTP. Every
//! validation route is POST-only and answers 200 for a valid verdict and
//! 400 for an invalid one, with the same body shape either way.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod settings;

// Re-export commonly used types
pub use error::*;
pub use server::AppState;
pub use settings::Settings;

use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.settings.server.max_body_bytes;
    let cors = middleware::create_cors_layer(&state.settings.server.cors_origins);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
