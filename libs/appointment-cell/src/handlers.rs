// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::KioskConfig;
use shared_models::error::AppError;

use crate::departments::{self, Department};
use crate::models::{CheckInRequest, CreateAppointmentRequest, KioskError};
use crate::services::{AvailabilityService, BookingService, CheckInService, PatientRosterService};

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub department: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarAvailabilityParams {
    pub department: String,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListParams {
    pub department: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatientListParams {
    pub date: Option<String>,
}

// ==============================================================================
// ERROR MAPPING
// ==============================================================================

fn map_kiosk_error(err: KioskError) -> AppError {
    match err {
        KioskError::InvalidDepartment(_)
        | KioskError::InvalidDateRange { .. }
        | KioskError::MissingCheckInFields
        | KioskError::CapacityExceeded { .. } => AppError::BadRequest(err.to_string()),
        KioskError::ValidationError(msg) => AppError::ValidationError(msg),
        KioskError::AppointmentNotFound => AppError::NotFound(err.to_string()),
        KioskError::StoreUnavailable => AppError::ServiceUnavailable(err.to_string()),
        KioskError::StoreError(msg) => AppError::Database(msg),
    }
}

/// Query-string departments arrive as free text; resolve them against
/// the registry before any domain logic runs.
fn parse_department(name: &str) -> Result<Department, AppError> {
    Department::from_name(name)
        .ok_or_else(|| map_kiosk_error(KioskError::InvalidDepartment(name.to_string())))
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_departments() -> Json<Value> {
    Json(json!(departments::registry()))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<KioskConfig>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<Value>, AppError> {
    let department = parse_department(&params.department)?;

    let service = AvailabilityService::new(&state);
    let report = service
        .day_availability(department, &params.date)
        .await
        .map_err(map_kiosk_error)?;

    Ok(Json(json!(report)))
}

#[axum::debug_handler]
pub async fn get_calendar_availability(
    State(state): State<Arc<KioskConfig>>,
    Query(params): Query<CalendarAvailabilityParams>,
) -> Result<Json<Value>, AppError> {
    let department = parse_department(&params.department)?;

    let service = AvailabilityService::new(&state);
    let month = service
        .month_availability(department, params.year, params.month)
        .await
        .map_err(map_kiosk_error)?;

    Ok(Json(json!(month)))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<KioskConfig>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);
    let confirmation = service
        .create_appointment(request)
        .await
        .map_err(map_kiosk_error)?;

    Ok(Json(json!(confirmation)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<KioskConfig>>,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<Value>, AppError> {
    let department = params
        .department
        .as_deref()
        .map(parse_department)
        .transpose()?;

    let service = PatientRosterService::new(&state);
    let appointments = service
        .list_appointments(department, params.date.as_deref())
        .await
        .map_err(map_kiosk_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn check_in(
    State(state): State<Arc<KioskConfig>>,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<Value>, AppError> {
    if !state.is_configured() {
        return Err(map_kiosk_error(KioskError::StoreUnavailable));
    }

    let service = CheckInService::new(&state);
    let confirmation = service.check_in(request).await.map_err(map_kiosk_error)?;

    Ok(Json(json!(confirmation)))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<KioskConfig>>,
    Query(params): Query<PatientListParams>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRosterService::new(&state);
    let report = service
        .list_patients(params.date.as_deref())
        .await
        .map_err(map_kiosk_error)?;

    Ok(Json(json!(report)))
}
