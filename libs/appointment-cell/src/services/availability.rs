// libs/appointment-cell/src/services/availability.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

use shared_config::KioskConfig;
use shared_database::store::DocumentStoreClient;

use crate::departments::Department;
use crate::models::{
    AvailabilityReport, DayAvailability, KioskError, MonthAvailability, APPOINTMENT_COLLECTION,
};

pub struct AvailabilityService {
    store: Arc<DocumentStoreClient>,
}

impl AvailabilityService {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            store: Arc::new(DocumentStoreClient::new(config)),
        }
    }

    pub fn with_store(store: Arc<DocumentStoreClient>) -> Self {
        Self { store }
    }

    /// Count of persisted appointments matching exact (department, date)
    /// string equality.
    pub async fn booked_count(
        &self,
        department: Department,
        date: &str,
    ) -> Result<i64, KioskError> {
        self.store
            .count(
                APPOINTMENT_COLLECTION,
                json!({ "department": department.name(), "date": date }),
            )
            .await
            .map_err(|e| KioskError::StoreError(e.to_string()))
    }

    pub async fn day_availability(
        &self,
        department: Department,
        date: &str,
    ) -> Result<AvailabilityReport, KioskError> {
        let capacity = department.capacity();
        let booked = self.booked_count(department, date).await?;

        debug!("{} booked for {} on {}", booked, department, date);

        Ok(AvailabilityReport {
            department,
            date: date.to_string(),
            capacity,
            booked,
            remaining: remaining(booked, capacity),
            used_pct: used_pct(booked, capacity),
        })
    }

    /// Per-day metrics for every real calendar day of the month.
    /// Candidate days 1..=31 that do not exist for the month (Feb 30,
    /// Apr 31, ...) are skipped.
    pub async fn month_availability(
        &self,
        department: Department,
        year: i32,
        month: u32,
    ) -> Result<MonthAvailability, KioskError> {
        if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
            return Err(KioskError::InvalidDateRange { year, month });
        }

        let capacity = department.capacity();
        let mut days = BTreeMap::new();

        for day in 1..=31 {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let date = date.format("%Y-%m-%d").to_string();
            let booked = self.booked_count(department, &date).await?;

            days.insert(
                date,
                DayAvailability {
                    booked,
                    remaining: remaining(booked, capacity),
                    used_pct: used_pct(booked, capacity),
                    capacity,
                },
            );
        }

        Ok(MonthAvailability {
            department,
            year,
            month,
            days,
        })
    }
}

fn remaining(booked: i64, capacity: i64) -> i64 {
    (capacity - booked).max(0)
}

/// Integer percentage of capacity in use, rounded half-up. Can exceed
/// 100 when a date is overbooked through the unguarded capacity check.
fn used_pct(booked: i64, capacity: i64) -> i64 {
    if capacity == 0 {
        return 0;
    }
    ((booked as f64 / capacity as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_pct_rounds_to_nearest_integer() {
        assert_eq!(used_pct(0, 25), 0);
        assert_eq!(used_pct(1, 25), 4);
        assert_eq!(used_pct(13, 25), 52);
        assert_eq!(used_pct(25, 25), 100);
        // 8/30 = 26.67% -> 27
        assert_eq!(used_pct(8, 30), 27);
    }

    #[test]
    fn used_pct_of_zero_capacity_is_zero() {
        assert_eq!(used_pct(5, 0), 0);
    }

    #[test]
    fn overbooked_dates_report_over_100_pct_and_zero_remaining() {
        assert_eq!(used_pct(30, 25), 120);
        assert_eq!(remaining(30, 25), 0);
    }

    #[test]
    fn remaining_plus_booked_is_capacity_when_not_overbooked() {
        for booked in 0..=25 {
            assert_eq!(remaining(booked, 25) + booked, 25);
        }
    }
}
