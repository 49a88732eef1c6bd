use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Method;

use shared_database::RestClient;

use crate::models::{Patient, PatientError};

#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>, PatientError>;
    async fn list_patients(&self) -> Result<Vec<Patient>, PatientError>;
}

#[derive(Default)]
pub struct InMemoryPatientDirectory {
    patients: RwLock<Vec<Patient>>,
}

impl InMemoryPatientDirectory {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients: RwLock::new(patients),
        }
    }
}

#[async_trait]
impl PatientDirectory for InMemoryPatientDirectory {
    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>, PatientError> {
        let patients = self.patients.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(patients.iter().find(|p| p.id == patient_id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        let patients = self.patients.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(patients.clone())
    }
}

pub struct RestPatientDirectory {
    client: RestClient,
}

impl RestPatientDirectory {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PatientDirectory for RestPatientDirectory {
    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>, PatientError> {
        let path = format!("/patients/{}/", patient_id);
        self.client
            .request_optional::<Patient>(Method::GET, &path, None)
            .await
            .map_err(|e| PatientError::Network(e.to_string()))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        self.client
            .request::<Vec<Patient>>(Method::GET, "/patients/", None)
            .await
            .map_err(|e| PatientError::Network(e.to_string()))
    }
}
