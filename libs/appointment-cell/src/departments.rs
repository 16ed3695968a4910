// libs/appointment-cell/src/departments.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniform daily appointment cap shared by every department.
pub const DEPARTMENT_CAPACITY: i64 = 25;

/// Closed set of service lines offered at the kiosk. The registry is
/// process-wide and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    General,
    Cardiology,
    Pediatrics,
    Radiology,
    Orthopedics,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::General,
        Department::Cardiology,
        Department::Pediatrics,
        Department::Radiology,
        Department::Orthopedics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Department::General => "General",
            Department::Cardiology => "Cardiology",
            Department::Pediatrics => "Pediatrics",
            Department::Radiology => "Radiology",
            Department::Orthopedics => "Orthopedics",
        }
    }

    /// Three-letter abbreviation used as the booking-code prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Department::General => "GEN",
            Department::Cardiology => "CAR",
            Department::Pediatrics => "PED",
            Department::Radiology => "RAD",
            Department::Orthopedics => "ORT",
        }
    }

    pub fn capacity(&self) -> i64 {
        DEPARTMENT_CAPACITY
    }

    pub fn from_name(name: &str) -> Option<Department> {
        Department::ALL
            .into_iter()
            .find(|department| department.name() == name)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentInfo {
    pub name: &'static str,
    pub capacity: i64,
}

/// The `{name, capacity}` listing served by `GET /departments`.
pub fn registry() -> Vec<DepartmentInfo> {
    Department::ALL
        .into_iter()
        .map(|department| DepartmentInfo {
            name: department.name(),
            capacity: department.capacity(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_department_names() {
        assert_eq!(Department::from_name("Cardiology"), Some(Department::Cardiology));
        assert_eq!(Department::from_name("General"), Some(Department::General));
        assert_eq!(Department::from_name("Dermatology"), None);
        assert_eq!(Department::from_name("cardiology"), None);
    }

    #[test]
    fn codes_are_first_three_letters_uppercased() {
        for department in Department::ALL {
            assert_eq!(department.code(), department.name()[..3].to_uppercase());
        }
    }

    #[test]
    fn registry_lists_every_department_with_shared_capacity() {
        let entries = registry();
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|entry| entry.capacity == 25));
        assert_eq!(entries[0].name, "General");
        assert_eq!(entries[4].name, "Orthopedics");
    }
}
