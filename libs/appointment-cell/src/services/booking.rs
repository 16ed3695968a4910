// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{info, warn};

use shared_config::KioskConfig;
use shared_database::store::DocumentStoreClient;

use crate::departments::Department;
use crate::models::{
    AppointmentStatus, BookingConfirmation, CreateAppointmentRequest, KioskError, NewAppointment,
    APPOINTMENT_COLLECTION,
};
use crate::services::availability::AvailabilityService;

pub struct BookingService {
    store: Arc<DocumentStoreClient>,
    availability: AvailabilityService,
}

impl BookingService {
    pub fn new(config: &KioskConfig) -> Self {
        let store = Arc::new(DocumentStoreClient::new(config));
        Self {
            availability: AvailabilityService::with_store(Arc::clone(&store)),
            store,
        }
    }

    /// Validates the request, enforces the per-(department, date)
    /// capacity cap, mints a booking code and persists the appointment.
    ///
    /// The capacity check and the sequence number both come from a count
    /// taken before the insert, with nothing serializing concurrent
    /// requests: two racing bookings can mint the same code or claim the
    /// last slot twice. Accepted limitation.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<BookingConfirmation, KioskError> {
        request.validate()?;

        let booked = self
            .availability
            .booked_count(request.department, &request.date)
            .await?;

        if booked >= request.department.capacity() {
            warn!(
                "Capacity reached for {} on {} ({} booked)",
                request.department, request.date, booked
            );
            return Err(KioskError::CapacityExceeded {
                department: request.department,
                date: request.date,
            });
        }

        let booking_code = booking_code(request.department, &request.date, booked + 1);

        let appointment = NewAppointment {
            patient_name: request.patient_name,
            phone: request.phone,
            email: request.email,
            department: request.department,
            date: request.date,
            time_slot: request.time_slot,
            status: AppointmentStatus::Booked,
            booking_code: booking_code.clone(),
        };

        let document = serde_json::to_value(&appointment)
            .map_err(|e| KioskError::StoreError(e.to_string()))?;
        let id = self
            .store
            .insert_one(APPOINTMENT_COLLECTION, document)
            .await
            .map_err(|e| KioskError::StoreError(e.to_string()))?;

        info!(
            "Booked appointment {} ({}) for {} on {}",
            id, booking_code, appointment.department, appointment.date
        );

        Ok(BookingConfirmation {
            id: id.to_string(),
            booking_code,
            status: AppointmentStatus::Booked,
        })
    }
}

/// `<dept code><date without dashes>-<3-digit sequence>`, where the
/// sequence is this booking's ordinal position for the department+date.
pub fn booking_code(department: Department, date: &str, sequence: i64) -> String {
    format!(
        "{}{}-{:03}",
        department.code(),
        date.replace('-', ""),
        sequence
    )
}
