// libs/doctor-cell/src/services/directory.rs
use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use shared_database::RestClient;

use crate::models::{Doctor, DoctorError};

/// Read access to the doctor roster.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, DoctorError>;
    async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError>;
}

#[derive(Default)]
pub struct InMemoryDoctorDirectory {
    doctors: RwLock<Vec<Doctor>>,
}

impl InMemoryDoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors: RwLock::new(doctors),
        }
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, DoctorError> {
        let doctors = self.doctors.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(doctors.iter().find(|doctor| doctor.id == doctor_id).cloned())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        let doctors = self.doctors.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(doctors.clone())
    }
}

/// Doctor roster served by the clinic REST backend (`/doctors/`).
pub struct RestDoctorDirectory {
    client: RestClient,
}

impl RestDoctorDirectory {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DoctorDirectory for RestDoctorDirectory {
    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, DoctorError> {
        debug!("Fetching doctor {} from backend", doctor_id);
        let path = format!("/doctors/{}/", doctor_id);
        self.client
            .request_optional::<Doctor>(Method::GET, &path, None)
            .await
            .map_err(|e| DoctorError::Network(e.to_string()))
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        self.client
            .request::<Vec<Doctor>>(Method::GET, "/doctors/", None)
            .await
            .map_err(|e| DoctorError::Network(e.to_string()))
    }
}
