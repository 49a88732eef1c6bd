use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{CreateMedicalRecordRequest, MedicalRecord, Patient, PatientError};
use crate::services::directory::PatientDirectory;
use crate::services::records::MedicalRecordStore;

pub struct PatientService {
    directory: Arc<dyn PatientDirectory>,
    records: Arc<dyn MedicalRecordStore>,
}

impl PatientService {
    pub fn new(directory: Arc<dyn PatientDirectory>, records: Arc<dyn MedicalRecordStore>) -> Self {
        Self { directory, records }
    }

    pub async fn get_patient(&self, patient_id: &str) -> Result<Patient, PatientError> {
        debug!("Fetching patient {}", patient_id);
        self.directory
            .get_patient(patient_id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        self.directory.list_patients().await
    }

    pub async fn list_records(&self) -> Result<Vec<MedicalRecord>, PatientError> {
        self.records.list_records().await
    }

    pub async fn records_for_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, PatientError> {
        self.get_patient(patient_id).await?;
        self.records.list_by_patient(patient_id).await
    }

    pub async fn get_record(&self, record_id: &str) -> Result<MedicalRecord, PatientError> {
        self.records
            .get_record(record_id)
            .await?
            .ok_or(PatientError::RecordNotFound)
    }

    /// Records need a diagnosis and must belong to a known patient.
    pub async fn create_record(&self, request: CreateMedicalRecordRequest) -> Result<MedicalRecord, PatientError> {
        if request.diagnosis.trim().is_empty() {
            return Err(PatientError::ValidationError("diagnosis is required".to_string()));
        }
        self.get_patient(&request.patient_id).await?;

        let record = self.records.insert_record(request).await?;
        info!("Medical record {} created for patient {}", record.id, record.patient_id);
        Ok(record)
    }
}
