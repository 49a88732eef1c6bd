use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::*;
use crate::services::PatientService;

pub fn create_patient_router(service: Arc<PatientService>) -> Router {
    Router::new()
        .route("/patients/", get(list_patients))
        .route("/patients/{patient_id}/", get(get_patient))
        .route("/patients/{patient_id}/medical-records/", get(get_patient_records))
        .route("/medical-records/", get(list_medical_records).post(create_medical_record))
        .route("/medical-records/{record_id}/", get(get_medical_record))
        .with_state(service)
}
