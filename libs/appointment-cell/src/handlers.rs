// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use shared_models::error::AppError;
use shared_models::TimeRange;

use crate::models::{
    Appointment, AppointmentError, AppointmentPatch, AvailabilityCheckRequest,
    AvailabilityCheckResponse, BookAppointmentRequest,
};
use crate::services::BookingEngine;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
}

pub(crate) fn appointment_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AppointmentError::ConflictDetected => AppError::Conflict(e.to_string()),
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
        AppointmentError::InvalidStatusTransition { .. } => AppError::BadRequest(e.to_string()),
        AppointmentError::Network(msg) => AppError::ExternalService(msg),
    }
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AppError::BadRequest("date is required".to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))
}

// ==============================================================================
// AVAILABILITY HANDLERS
// ==============================================================================

pub async fn get_available_slots(
    State(engine): State<Arc<BookingEngine>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<TimeRange>>, AppError> {
    let date = parse_date(query.date.as_deref())?;
    let slots = engine
        .get_available_slots(&doctor_id, date)
        .await
        .map_err(appointment_error)?;
    Ok(Json(slots))
}

pub async fn check_availability(
    State(engine): State<Arc<BookingEngine>>,
    Json(request): Json<AvailabilityCheckRequest>,
) -> Result<Json<AvailabilityCheckResponse>, AppError> {
    let doctor_id = request.doctor_id.as_deref().map(str::trim).unwrap_or_default();
    if doctor_id.is_empty() {
        return Err(AppError::BadRequest("Doctor ID and date are required".to_string()));
    }
    let date = parse_date(request.date.as_deref())?;

    let available_slots = engine
        .get_available_slots(doctor_id, date)
        .await
        .map_err(appointment_error)?;

    Ok(Json(AvailabilityCheckResponse {
        doctor_id: doctor_id.to_string(),
        date,
        available_slots,
    }))
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

pub async fn list_appointments(
    State(engine): State<Arc<BookingEngine>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = engine.list_appointments().await.map_err(appointment_error)?;
    Ok(Json(appointments))
}

pub async fn book_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = engine
        .create_appointment(request)
        .await
        .map_err(appointment_error)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn get_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = engine
        .get_appointment(&appointment_id)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(appointment_id): Path<String>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = engine
        .update_appointment(&appointment_id, patch)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(appointment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    engine
        .delete_appointment(&appointment_id)
        .await
        .map_err(appointment_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cancel_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = engine
        .cancel_appointment(&appointment_id)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointment))
}

pub async fn confirm_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = engine
        .confirm_appointment(&appointment_id)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointment))
}

pub async fn complete_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = engine
        .complete_appointment(&appointment_id)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointment))
}

// ==============================================================================
// LISTINGS
// ==============================================================================

pub async fn get_doctor_appointments(
    State(engine): State<Arc<BookingEngine>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = engine
        .appointments_for_doctor(&doctor_id)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointments))
}

pub async fn get_patient_appointments(
    State(engine): State<Arc<BookingEngine>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = engine
        .appointments_for_patient(&patient_id)
        .await
        .map_err(appointment_error)?;
    Ok(Json(appointments))
}
