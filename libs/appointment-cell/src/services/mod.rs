pub mod booking;
pub mod conflict;
pub mod lifecycle;
pub mod store;

pub use booking::BookingEngine;
pub use conflict::ConflictDetectionService;
pub use lifecycle::AppointmentLifecycleService;
pub use store::{AppointmentStore, InMemoryAppointmentStore, RestAppointmentStore};
