pub mod availability;
pub mod directory;
pub mod doctor;

pub use availability::AvailabilityService;
pub use directory::{DoctorDirectory, InMemoryDoctorDirectory, RestDoctorDirectory};
pub use doctor::DoctorService;
