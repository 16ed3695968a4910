use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::kiosk_routes;
use diagnostics_cell::router::diagnostics_routes;
use shared_config::KioskConfig;

pub fn create_router(state: Arc<KioskConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital Kiosk Backend Running" }))
        .merge(kiosk_routes(state.clone()))
        .merge(diagnostics_routes(state))
}
