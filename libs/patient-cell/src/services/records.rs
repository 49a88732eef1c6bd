// libs/patient-cell/src/services/records.rs
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use shared_database::RestClient;

use crate::models::{CreateMedicalRecordRequest, MedicalRecord, PatientError};

/// Storage for medical records; callers validate before inserting.
#[async_trait]
pub trait MedicalRecordStore: Send + Sync {
    async fn list_records(&self) -> Result<Vec<MedicalRecord>, PatientError>;
    async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, PatientError>;
    async fn get_record(&self, record_id: &str) -> Result<Option<MedicalRecord>, PatientError>;
    async fn insert_record(&self, request: CreateMedicalRecordRequest) -> Result<MedicalRecord, PatientError>;
}

#[derive(Default)]
pub struct InMemoryMedicalRecordStore {
    records: RwLock<Vec<MedicalRecord>>,
}

impl InMemoryMedicalRecordStore {
    pub fn new(records: Vec<MedicalRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl MedicalRecordStore for InMemoryMedicalRecordStore {
    async fn list_records(&self) -> Result<Vec<MedicalRecord>, PatientError> {
        let records = self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.clone())
    }

    async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, PatientError> {
        let records = self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.iter().filter(|r| r.patient_id == patient_id).cloned().collect())
    }

    async fn get_record(&self, record_id: &str) -> Result<Option<MedicalRecord>, PatientError> {
        let records = self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.iter().find(|r| r.id == record_id).cloned())
    }

    async fn insert_record(&self, request: CreateMedicalRecordRequest) -> Result<MedicalRecord, PatientError> {
        let record = MedicalRecord {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            appointment_id: request.appointment_id,
            diagnosis: request.diagnosis,
            prescription: request.prescription,
            notes: request.notes,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(record.clone());
        Ok(record)
    }
}

pub struct RestMedicalRecordStore {
    client: RestClient,
}

impl RestMedicalRecordStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MedicalRecordStore for RestMedicalRecordStore {
    async fn list_records(&self) -> Result<Vec<MedicalRecord>, PatientError> {
        self.client
            .request::<Vec<MedicalRecord>>(Method::GET, "/medical-records/", None)
            .await
            .map_err(|e| PatientError::Network(e.to_string()))
    }

    async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, PatientError> {
        let path = format!("/patients/{}/medical_records/", patient_id);
        self.client
            .request::<Vec<MedicalRecord>>(Method::GET, &path, None)
            .await
            .map_err(|e| PatientError::Network(e.to_string()))
    }

    async fn get_record(&self, record_id: &str) -> Result<Option<MedicalRecord>, PatientError> {
        let path = format!("/medical-records/{}/", record_id);
        self.client
            .request_optional::<MedicalRecord>(Method::GET, &path, None)
            .await
            .map_err(|e| PatientError::Network(e.to_string()))
    }

    async fn insert_record(&self, request: CreateMedicalRecordRequest) -> Result<MedicalRecord, PatientError> {
        let body = json!({
            "patient_id": request.patient_id,
            "appointment_id": request.appointment_id,
            "diagnosis": request.diagnosis,
            "prescription": request.prescription,
            "notes": request.notes,
        });

        self.client
            .request::<MedicalRecord>(Method::POST, "/medical-records/", Some(body))
            .await
            .map_err(|e| PatientError::Network(e.to_string()))
    }
}
