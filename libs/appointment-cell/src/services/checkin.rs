// libs/appointment-cell/src/services/checkin.rs
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use shared_config::KioskConfig;
use shared_database::store::DocumentStoreClient;

use crate::models::{
    AppointmentRecord, AppointmentStatus, CheckInConfirmation, CheckInRequest, KioskError,
    APPOINTMENT_COLLECTION,
};

pub struct CheckInService {
    store: Arc<DocumentStoreClient>,
}

impl CheckInService {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            store: Arc::new(DocumentStoreClient::new(config)),
        }
    }

    pub fn with_store(store: Arc<DocumentStoreClient>) -> Self {
        Self { store }
    }

    /// Marks an appointment checked in. Lookup is by booking code alone
    /// when one is given, otherwise by exact match on name, phone,
    /// department and date together. Checking in an already-checked-in
    /// appointment returns its current state unchanged.
    pub async fn check_in(
        &self,
        request: CheckInRequest,
    ) -> Result<CheckInConfirmation, KioskError> {
        let filter = if let Some(code) = &request.booking_code {
            json!({ "booking_code": code })
        } else {
            match (
                &request.patient_name,
                &request.phone,
                request.department,
                &request.date,
            ) {
                (Some(name), Some(phone), Some(department), Some(date)) => json!({
                    "patient_name": name,
                    "phone": phone,
                    "department": department.name(),
                    "date": date,
                }),
                _ => return Err(KioskError::MissingCheckInFields),
            }
        };

        let document = self
            .store
            .find_one(APPOINTMENT_COLLECTION, filter)
            .await
            .map_err(|e| KioskError::StoreError(e.to_string()))?
            .ok_or(KioskError::AppointmentNotFound)?;

        let record: AppointmentRecord = serde_json::from_value(document)
            .map_err(|e| KioskError::StoreError(format!("malformed appointment document: {}", e)))?;

        if record.status == AppointmentStatus::CheckedIn {
            debug!("Appointment {} already checked in", record.id);
            return Ok(CheckInConfirmation {
                id: record.id.to_string(),
                status: AppointmentStatus::CheckedIn,
                booking_code: record.booking_code,
            });
        }

        // Unlocked read-modify-write: racing check-ins both land on the
        // same terminal state, so the outcome stays correct.
        let matched = self
            .store
            .update_one(
                APPOINTMENT_COLLECTION,
                json!({ "_id": &record.id }),
                json!({
                    "status": AppointmentStatus::CheckedIn,
                    "checked_in_at": Utc::now(),
                }),
            )
            .await
            .map_err(|e| KioskError::StoreError(e.to_string()))?;

        if matched == 0 {
            debug!(
                "Appointment {} vanished between lookup and check-in update",
                record.id
            );
        }

        info!("Checked in appointment {} ({})", record.id, record.booking_code);

        Ok(CheckInConfirmation {
            id: record.id.to_string(),
            status: AppointmentStatus::CheckedIn,
            booking_code: record.booking_code,
        })
    }
}
