// libs/appointment-cell/src/services/roster.rs
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use shared_config::KioskConfig;
use shared_database::store::DocumentStoreClient;

use crate::departments::Department;
use crate::models::{
    AppointmentRecord, AppointmentStatus, AppointmentView, KioskError, PatientEntry,
    PatientSummary, PatientsReport, APPOINTMENT_COLLECTION,
};

pub struct PatientRosterService {
    store: Arc<DocumentStoreClient>,
}

impl PatientRosterService {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            store: Arc::new(DocumentStoreClient::new(config)),
        }
    }

    pub fn with_store(store: Arc<DocumentStoreClient>) -> Self {
        Self { store }
    }

    /// Summarized listing for staff: every appointment (optionally
    /// narrowed to one date) plus counts by status.
    pub async fn list_patients(&self, date: Option<&str>) -> Result<PatientsReport, KioskError> {
        let mut filter = Map::new();
        if let Some(date) = date {
            filter.insert("date".to_string(), Value::String(date.to_string()));
        }

        let records = self.fetch(Value::Object(filter)).await?;
        let patients: Vec<PatientEntry> = records.into_iter().map(PatientEntry::from).collect();

        let total = patients.len() as i64;
        let checked_in = patients
            .iter()
            .filter(|patient| patient.status == AppointmentStatus::CheckedIn)
            .count() as i64;

        Ok(PatientsReport {
            summary: PatientSummary {
                total,
                checked_in,
                booked: total - checked_in,
            },
            patients,
        })
    }

    /// Raw filtered listing; store identifiers are stringified to a
    /// client-facing `id`. Iteration order is whatever the store returns.
    pub async fn list_appointments(
        &self,
        department: Option<Department>,
        date: Option<&str>,
    ) -> Result<Vec<AppointmentView>, KioskError> {
        let mut filter = Map::new();
        if let Some(department) = department {
            filter.insert(
                "department".to_string(),
                Value::String(department.name().to_string()),
            );
        }
        if let Some(date) = date {
            filter.insert("date".to_string(), Value::String(date.to_string()));
        }

        let records = self.fetch(Value::Object(filter)).await?;
        Ok(records.into_iter().map(AppointmentView::from).collect())
    }

    async fn fetch(&self, filter: Value) -> Result<Vec<AppointmentRecord>, KioskError> {
        let documents = self
            .store
            .find(APPOINTMENT_COLLECTION, filter)
            .await
            .map_err(|e| KioskError::StoreError(e.to_string()))?;

        debug!("Fetched {} appointment documents", documents.len());

        documents
            .into_iter()
            .map(|document| {
                serde_json::from_value(document).map_err(|e| {
                    KioskError::StoreError(format!("malformed appointment document: {}", e))
                })
            })
            .collect()
    }
}
