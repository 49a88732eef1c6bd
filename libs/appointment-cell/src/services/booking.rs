// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use doctor_cell::models::Doctor;
use doctor_cell::services::{AvailabilityService, DoctorDirectory};
use shared_models::scheduling::parse_wall_clock;
use shared_models::TimeRange;

use crate::models::{
    Appointment, AppointmentError, AppointmentPatch, AppointmentStatus, BookAppointmentRequest,
    NewAppointment,
};
use crate::services::conflict::ConflictDetectionService;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::store::AppointmentStore;

/// Availability queries and conflict-checked bookings for one clinic.
///
/// Every write that depends on a conflict check runs while holding
/// `write_lock`, so two bookings racing for the same slot in this process
/// cannot both pass the check.
pub struct BookingEngine {
    store: Arc<dyn AppointmentStore>,
    doctors: Arc<dyn DoctorDirectory>,
    availability: AvailabilityService,
    conflict_service: ConflictDetectionService,
    lifecycle_service: AppointmentLifecycleService,
    write_lock: Mutex<()>,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn AppointmentStore>, doctors: Arc<dyn DoctorDirectory>) -> Self {
        Self::with_availability(store, doctors, AvailabilityService::default())
    }

    pub fn with_availability(
        store: Arc<dyn AppointmentStore>,
        doctors: Arc<dyn DoctorDirectory>,
        availability: AvailabilityService,
    ) -> Self {
        Self {
            store,
            doctors,
            availability,
            conflict_service: ConflictDetectionService::new(),
            lifecycle_service: AppointmentLifecycleService::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn slot_minutes(&self) -> u32 {
        self.availability.slot_minutes()
    }

    // ==========================================================================
    // AVAILABILITY
    // ==========================================================================

    /// Free slots for `doctor_id` on `date`, sorted by start time.
    pub async fn get_available_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeRange>, AppointmentError> {
        debug!("Computing available slots for doctor {} on {}", doctor_id, date);

        let doctor = self.require_doctor(doctor_id).await?;
        let existing = self.store.list_by_doctor(doctor_id).await?;
        let booked = self.conflict_service.booked_ranges(&existing, date);

        Ok(self.availability.free_slots(&doctor, date, &booked))
    }

    // ==========================================================================
    // BOOKING
    // ==========================================================================

    pub async fn create_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let mut candidate = self.validate_booking_request(request)?;

        let _guard = self.write_lock.lock().await;

        let doctor = self.require_doctor(&candidate.doctor_id).await?;
        let existing = self.store.list_by_doctor(&candidate.doctor_id).await?;

        if self
            .conflict_service
            .has_conflict(&existing, candidate.date, &candidate.time_range(), None)
        {
            return Err(AppointmentError::ConflictDetected);
        }

        candidate.doctor_name = Some(doctor.full_name());
        let appointment = self.store.insert(candidate).await?;

        info!(
            "Appointment {} booked with doctor {} on {} at {}",
            appointment.id,
            appointment.doctor_id,
            appointment.date,
            appointment.time_range()
        );

        Ok(appointment)
    }

    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, AppointmentError> {
        if let Some(reason) = &patch.reason {
            if reason.trim().is_empty() {
                return Err(AppointmentError::ValidationError("reason is required".to_string()));
            }
        }

        let _guard = self.write_lock.lock().await;

        let current = self.require_appointment(appointment_id).await?;

        if let Some(status) = patch.status {
            if status != current.status {
                self.lifecycle_service
                    .validate_status_transition(current.status, status)?;
            }
        }

        let mut merged = current.clone();
        patch.apply_to(&mut merged);

        if patch.touches_schedule() {
            let interval = TimeRange::new(merged.start_time, merged.end_time).ok_or_else(|| {
                AppointmentError::ValidationError("start_time must be before end_time".to_string())
            })?;

            if merged.occupies_slot() {
                let existing = self.store.list_by_doctor(&merged.doctor_id).await?;
                if self.conflict_service.has_conflict(
                    &existing,
                    merged.date,
                    &interval,
                    Some(&merged.id),
                ) {
                    return Err(AppointmentError::ConflictDetected);
                }
            }
        }

        let updated = self
            .store
            .patch(appointment_id, &patch)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} updated", updated.id);
        Ok(updated)
    }

    // ==========================================================================
    // STATUS TRANSITIONS
    // ==========================================================================

    /// Cancelling an already cancelled appointment returns it unchanged.
    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        let _guard = self.write_lock.lock().await;

        let current = self.require_appointment(appointment_id).await?;
        if current.status == AppointmentStatus::Cancelled {
            debug!("Appointment {} already cancelled", appointment_id);
            return Ok(current);
        }

        self.apply_status(current, AppointmentStatus::Cancelled).await
    }

    pub async fn confirm_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        let _guard = self.write_lock.lock().await;
        let current = self.require_appointment(appointment_id).await?;
        self.apply_status(current, AppointmentStatus::Confirmed).await
    }

    pub async fn complete_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        let _guard = self.write_lock.lock().await;
        let current = self.require_appointment(appointment_id).await?;
        self.apply_status(current, AppointmentStatus::Completed).await
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        let _guard = self.write_lock.lock().await;

        if !self.store.delete(appointment_id).await? {
            return Err(AppointmentError::NotFound);
        }

        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }

    // ==========================================================================
    // READS
    // ==========================================================================

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.require_appointment(appointment_id).await
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.store.list_all().await
    }

    pub async fn appointments_for_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        self.store.list_by_doctor(doctor_id).await
    }

    pub async fn appointments_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        self.store.list_by_patient(patient_id).await
    }

    // ==========================================================================
    // HELPERS
    // ==========================================================================

    fn validate_booking_request(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<NewAppointment, AppointmentError> {
        let doctor_id = required_text(request.doctor_id.as_deref(), "doctor_id")?;
        let patient_id = required_text(request.patient_id.as_deref(), "patient_id")?;
        let reason = required_text(request.reason.as_deref(), "reason")?;

        let date = required_text(request.date.as_deref(), "date")?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
            AppointmentError::ValidationError("Invalid date format. Use YYYY-MM-DD".to_string())
        })?;
        let start_time = required_time(request.start_time.as_deref(), "start_time")?;
        let end_time = required_time(request.end_time.as_deref(), "end_time")?;

        if start_time >= end_time {
            return Err(AppointmentError::ValidationError(
                "start_time must be before end_time".to_string(),
            ));
        }

        Ok(NewAppointment {
            patient_id,
            doctor_id,
            date,
            start_time,
            end_time,
            status: AppointmentStatus::Scheduled,
            reason,
            notes: request.notes,
            patient_name: request.patient_name,
            doctor_name: None,
        })
    }

    async fn require_doctor(&self, doctor_id: &str) -> Result<Doctor, AppointmentError> {
        self.doctors
            .get_doctor(doctor_id)
            .await?
            .ok_or(AppointmentError::DoctorNotFound)
    }

    async fn require_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.store
            .get(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    async fn apply_status(
        &self,
        current: Appointment,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        if let Err(e) = self.lifecycle_service.validate_status_transition(current.status, status) {
            warn!("Rejected status change for appointment {}: {}", current.id, e);
            return Err(e);
        }

        let updated = self
            .store
            .patch(&current.id, &AppointmentPatch::status(status))
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} is now {}", updated.id, updated.status);
        Ok(updated)
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, AppointmentError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppointmentError::ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn required_time(value: Option<&str>, field: &str) -> Result<NaiveTime, AppointmentError> {
    let raw = required_text(value, field)?;
    parse_wall_clock(&raw).ok_or_else(|| {
        AppointmentError::ValidationError(format!("Invalid {} format. Use HH:MM", field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use doctor_cell::services::InMemoryDoctorDirectory;
    use mockall::mock;

    mock! {
        Store {}

        #[async_trait]
        impl AppointmentStore for Store {
            async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError>;
            async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, AppointmentError>;
            async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError>;
            async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>, AppointmentError>;
            async fn insert(&self, record: NewAppointment) -> Result<Appointment, AppointmentError>;
            async fn patch(
                &self,
                appointment_id: &str,
                fields: &AppointmentPatch,
            ) -> Result<Option<Appointment>, AppointmentError>;
            async fn delete(&self, appointment_id: &str) -> Result<bool, AppointmentError>;
        }
    }

    fn request(doctor_id: &str, reason: &str) -> BookAppointmentRequest {
        BookAppointmentRequest {
            patient_id: Some("2".to_string()),
            doctor_id: Some(doctor_id.to_string()),
            date: Some("2025-06-09".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some("09:30".to_string()),
            reason: Some(reason.to_string()),
            ..BookAppointmentRequest::default()
        }
    }

    #[tokio::test]
    async fn validation_runs_before_any_store_access() {
        let mut store = MockStore::new();
        store.expect_list_by_doctor().never();
        store.expect_insert().never();

        let engine = BookingEngine::new(Arc::new(store), Arc::new(InMemoryDoctorDirectory::default()));

        assert_matches!(
            engine.create_appointment(request("4", "   ")).await,
            Err(AppointmentError::ValidationError(_))
        );
    }

    #[tokio::test]
    async fn store_failures_propagate_as_network_errors() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppointmentError::Network("connection refused".to_string())));

        let engine = BookingEngine::new(Arc::new(store), Arc::new(InMemoryDoctorDirectory::default()));

        assert_matches!(
            engine.cancel_appointment("1").await,
            Err(AppointmentError::Network(msg)) if msg.contains("refused")
        );
    }

    #[tokio::test]
    async fn missing_doctor_never_reaches_the_store() {
        let mut store = MockStore::new();
        store.expect_list_by_doctor().never();
        store.expect_insert().never();

        let engine = BookingEngine::new(Arc::new(store), Arc::new(InMemoryDoctorDirectory::default()));

        assert_matches!(
            engine.create_appointment(request("99", "Checkup")).await,
            Err(AppointmentError::DoctorNotFound)
        );
    }
}
