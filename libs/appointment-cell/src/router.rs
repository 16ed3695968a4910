// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::KioskConfig;

use crate::handlers;

pub fn kiosk_routes(state: Arc<KioskConfig>) -> Router {
    Router::new()
        .route("/departments", get(handlers::list_departments))
        .route("/availability", get(handlers::get_availability))
        .route(
            "/calendar-availability",
            get(handlers::get_calendar_availability),
        )
        .route(
            "/appointments",
            post(handlers::create_appointment).get(handlers::list_appointments),
        )
        .route("/checkin", post(handlers::check_in))
        .route("/patients", get(handlers::list_patients))
        .with_state(state)
}
