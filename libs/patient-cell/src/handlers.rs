use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_models::error::AppError;

use crate::models::{CreateMedicalRecordRequest, MedicalRecord, Patient, PatientError};
use crate::services::PatientService;

fn patient_error(e: PatientError) -> AppError {
    match e {
        PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
        PatientError::RecordNotFound => AppError::NotFound("Medical record not found".to_string()),
        PatientError::ValidationError(msg) => AppError::ValidationError(msg),
        PatientError::Network(msg) => AppError::ExternalService(msg),
    }
}

pub async fn list_patients(
    State(service): State<Arc<PatientService>>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = service.list_patients().await.map_err(patient_error)?;
    Ok(Json(patients))
}

pub async fn get_patient(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let patient = service.get_patient(&patient_id).await.map_err(patient_error)?;
    Ok(Json(patient))
}

pub async fn get_patient_records(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<MedicalRecord>>, AppError> {
    let records = service.records_for_patient(&patient_id).await.map_err(patient_error)?;
    Ok(Json(records))
}

pub async fn list_medical_records(
    State(service): State<Arc<PatientService>>,
) -> Result<Json<Vec<MedicalRecord>>, AppError> {
    let records = service.list_records().await.map_err(patient_error)?;
    Ok(Json(records))
}

pub async fn get_medical_record(
    State(service): State<Arc<PatientService>>,
    Path(record_id): Path<String>,
) -> Result<Json<MedicalRecord>, AppError> {
    let record = service.get_record(&record_id).await.map_err(patient_error)?;
    Ok(Json(record))
}

pub async fn create_medical_record(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<CreateMedicalRecordRequest>,
) -> Result<(StatusCode, Json<MedicalRecord>), AppError> {
    let record = service.create_record(request).await.map_err(patient_error)?;
    Ok((StatusCode::CREATED, Json(record)))
}
