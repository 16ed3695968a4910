// libs/appointment-cell/src/models.rs
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use shared_database::store::DocumentId;

use crate::departments::Department;

/// The single persisted collection.
pub const APPOINTMENT_COLLECTION: &str = "appointment";

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Booked,
    CheckedIn,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Booked => write!(f, "booked"),
            AppointmentStatus::CheckedIn => write!(f, "checked_in"),
        }
    }
}

/// Insert shape for a fresh booking; the store assigns the identifier.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub patient_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub department: Department,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    pub status: AppointmentStatus,
    pub booking_code: String,
}

/// An appointment as read back from the store. Documents written before
/// check-in carry no `checked_in_at`; legacy documents may lack `status`
/// or `booking_code`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub patient_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub department: Department,
    pub date: String,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub booking_code: String,
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Client-facing projection of a stored appointment; the store id is
/// flattened to a plain string `id`.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    pub id: String,
    pub patient_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub department: Department,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    pub status: AppointmentStatus,
    pub booking_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<AppointmentRecord> for AppointmentView {
    fn from(record: AppointmentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            patient_name: record.patient_name,
            phone: record.phone,
            email: record.email,
            department: record.department,
            date: record.date,
            time_slot: record.time_slot,
            status: record.status,
            booking_code: record.booking_code,
            checked_in_at: record.checked_in_at,
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub department: Department,
    pub date: String,
    #[serde(default)]
    pub time_slot: Option<String>,
}

impl CreateAppointmentRequest {
    /// Format-level checks, run before any store access. The date is
    /// only checked for `YYYY-MM-DD` shape, not calendar validity.
    pub fn validate(&self) -> Result<(), KioskError> {
        if self.patient_name.trim().len() < 2 {
            return Err(KioskError::ValidationError(
                "patient_name must be at least 2 characters".to_string(),
            ));
        }

        if !date_shape_regex().is_match(&self.date) {
            return Err(KioskError::ValidationError(format!(
                "date must be in YYYY-MM-DD form, got '{}'",
                self.date
            )));
        }

        if let Some(email) = &self.email {
            if !email_regex().is_match(email) {
                return Err(KioskError::ValidationError(format!(
                    "'{}' is not a valid email address",
                    email
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub booking_code: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub id: String,
    pub booking_code: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInConfirmation {
    pub id: String,
    pub status: AppointmentStatus,
    pub booking_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    pub department: Department,
    pub date: String,
    pub capacity: i64,
    pub booked: i64,
    pub remaining: i64,
    pub used_pct: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    pub booked: i64,
    pub remaining: i64,
    pub used_pct: i64,
    pub capacity: i64,
}

/// Per-day metrics for one month. `BTreeMap` on ISO date keys keeps the
/// days in ascending order.
#[derive(Debug, Clone, Serialize)]
pub struct MonthAvailability {
    pub department: Department,
    pub year: i32,
    pub month: u32,
    pub days: BTreeMap<String, DayAvailability>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientEntry {
    pub id: String,
    pub patient_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub department: Department,
    pub date: String,
    pub status: AppointmentStatus,
    pub booking_code: String,
}

impl From<AppointmentRecord> for PatientEntry {
    fn from(record: AppointmentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            patient_name: record.patient_name,
            phone: record.phone,
            email: record.email,
            department: record.department,
            date: record.date,
            status: record.status,
            booking_code: record.booking_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub total: i64,
    pub checked_in: i64,
    pub booked: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientsReport {
    pub summary: PatientSummary,
    pub patients: Vec<PatientEntry>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum KioskError {
    #[error("Unknown department: {0}")]
    InvalidDepartment(String),

    #[error("year/month out of range: {year}-{month}")]
    InvalidDateRange { year: i32, month: u32 },

    #[error("No slots available for this date and department")]
    CapacityExceeded { department: Department, date: String },

    #[error("Provide booking_code or name, phone, department and date")]
    MissingCheckInFields,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Document store not available")]
    StoreUnavailable,

    #[error("Store error: {0}")]
    StoreError(String),
}

// ==============================================================================
// FORMAT VALIDATORS
// ==============================================================================

fn date_shape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}
