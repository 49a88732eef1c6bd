// libs/doctor-cell/src/services/doctor.rs
use std::sync::Arc;

use tracing::debug;

use crate::models::{Availability, Doctor, DoctorError, DoctorSearchFilters};
use crate::services::directory::DoctorDirectory;

pub struct DoctorService {
    directory: Arc<dyn DoctorDirectory>,
}

impl DoctorService {
    pub fn new(directory: Arc<dyn DoctorDirectory>) -> Self {
        Self { directory }
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor profile for ID: {}", doctor_id);

        self.directory
            .get_doctor(doctor_id)
            .await?
            .ok_or(DoctorError::NotFound)
    }

    /// Browse doctors, optionally narrowed to one specialization.
    pub async fn search_doctors(&self, filters: DoctorSearchFilters) -> Result<Vec<Doctor>, DoctorError> {
        let doctors = self.directory.list_doctors().await?;

        let matches: Vec<Doctor> = match filters.specialization.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => doctors
                .into_iter()
                .filter(|doctor| doctor.has_specialization(name))
                .collect(),
            _ => doctors,
        };

        debug!("Doctor search returned {} results", matches.len());
        Ok(matches)
    }

    pub async fn get_availability(&self, doctor_id: &str) -> Result<Vec<Availability>, DoctorError> {
        let doctor = self.get_doctor(doctor_id).await?;
        Ok(doctor.availability)
    }
}
