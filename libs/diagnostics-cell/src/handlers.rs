// libs/diagnostics-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_config::KioskConfig;

use crate::services::StoreHealthService;

#[axum::debug_handler]
pub async fn store_diagnostics(State(state): State<Arc<KioskConfig>>) -> Json<Value> {
    let service = StoreHealthService::new(&state);
    let report = service.diagnose().await;

    Json(json!(report))
}
