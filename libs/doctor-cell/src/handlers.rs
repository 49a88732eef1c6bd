use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use shared_models::error::AppError;

use crate::models::{Availability, Doctor, DoctorError, DoctorSearchFilters};
use crate::services::DoctorService;

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialization: Option<String>,
}

pub(crate) fn doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::Network(msg) => AppError::ExternalService(msg),
    }
}

pub async fn search_doctors(
    State(service): State<Arc<DoctorService>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let filters = DoctorSearchFilters {
        specialization: query.specialization,
    };

    let doctors = service.search_doctors(filters).await.map_err(doctor_error)?;
    Ok(Json(doctors))
}

pub async fn get_doctor(
    State(service): State<Arc<DoctorService>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = service.get_doctor(&doctor_id).await.map_err(doctor_error)?;
    Ok(Json(doctor))
}

pub async fn get_doctor_availability(
    State(service): State<Arc<DoctorService>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Availability>>, AppError> {
    let availability = service.get_availability(&doctor_id).await.map_err(doctor_error)?;
    Ok(Json(availability))
}
