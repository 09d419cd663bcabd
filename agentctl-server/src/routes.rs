use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, server::AppState};

/// Create all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/version", get(handlers::health::version_info))
        .nest("/api/validate", validation_routes())
}

/// POST-only validation endpoints. Any other method answers 405 with a JSON
/// body instead of axum's empty default.
fn validation_routes() -> Router<AppState> {
    use handlers::validate::*;

    Router::new()
        .route("/aip", post(validate_aip).fallback(method_not_allowed))
        .route("/ctx", post(validate_ctx).fallback(method_not_allowed))
        .route("/adp", post(validate_adp).fallback(method_not_allowed))
        .route("/pvs", post(validate_pvs).fallback(method_not_allowed))
        .route("/manifest", post(validate_manifest).fallback(method_not_allowed))
}
