// libs/diagnostics-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::KioskConfig;

use crate::handlers;

pub fn diagnostics_routes(state: Arc<KioskConfig>) -> Router {
    Router::new()
        .route("/test", get(handlers::store_diagnostics))
        .with_state(state)
}
