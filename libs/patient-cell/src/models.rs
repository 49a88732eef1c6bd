use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
    pub insurance_provider: Option<String>,
    pub insurance_id: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub diagnosis: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicalRecordRequest {
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub diagnosis: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Medical record not found")]
    RecordNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Patient backend unavailable: {0}")]
    Network(String),
}
