pub mod availability;
pub mod booking;
pub mod checkin;
pub mod roster;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use checkin::CheckInService;
pub use roster::PatientRosterService;
