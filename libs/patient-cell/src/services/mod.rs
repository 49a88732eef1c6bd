pub mod directory;
pub mod patient;
pub mod records;

pub use directory::{InMemoryPatientDirectory, PatientDirectory, RestPatientDirectory};
pub use patient::PatientService;
pub use records::{InMemoryMedicalRecordStore, MedicalRecordStore, RestMedicalRecordStore};
