// libs/appointment-cell/src/services/store.rs
use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use shared_database::RestClient;

use crate::models::{Appointment, AppointmentError, AppointmentPatch, NewAppointment};

/// Persistence for appointments. Callers validate and conflict-check before writing.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError>;
    async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, AppointmentError>;
    async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError>;
    async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>, AppointmentError>;
    async fn insert(&self, record: NewAppointment) -> Result<Appointment, AppointmentError>;
    /// `Ok(None)` when the appointment does not exist.
    async fn patch(
        &self,
        appointment_id: &str,
        fields: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentError>;
    /// `Ok(false)` when the appointment does not exist.
    async fn delete(&self, appointment_id: &str) -> Result<bool, AppointmentError>;
}

/// Process-local store, kept in insertion order.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: RwLock::new(appointments),
        }
    }

    fn filtered<F>(&self, keep: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        let appointments = self.appointments.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        appointments.iter().filter(|a| keep(a)).cloned().collect()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.filtered(|_| true))
    }

    async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.filtered(|a| a.doctor_id == doctor_id))
    }

    async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.filtered(|a| a.patient_id == patient_id))
    }

    async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>, AppointmentError> {
        Ok(self.filtered(|a| a.id == appointment_id).into_iter().next())
    }

    async fn insert(&self, record: NewAppointment) -> Result<Appointment, AppointmentError> {
        let appointment = record.with_id(Uuid::new_v4().to_string());
        let mut appointments = self.appointments.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn patch(
        &self,
        appointment_id: &str,
        fields: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentError> {
        let mut appointments = self.appointments.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .map(|appointment| {
                fields.apply_to(appointment);
                appointment.clone()
            }))
    }

    async fn delete(&self, appointment_id: &str) -> Result<bool, AppointmentError> {
        let mut appointments = self.appointments.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = appointments.len();
        appointments.retain(|a| a.id != appointment_id);
        Ok(appointments.len() != before)
    }
}

/// Appointments served by the clinic REST backend.
pub struct RestAppointmentStore {
    client: RestClient,
}

impl RestAppointmentStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching appointments from {}", path);
        self.client
            .request::<Vec<Appointment>>(Method::GET, path, None)
            .await
            .map_err(network_error)
    }
}

fn network_error(error: anyhow::Error) -> AppointmentError {
    AppointmentError::Network(error.to_string())
}

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppointmentError> {
    serde_json::to_value(value).map_err(|e| AppointmentError::Network(format!("encode failed: {}", e)))
}

#[async_trait]
impl AppointmentStore for RestAppointmentStore {
    async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.fetch_list("/appointments/").await
    }

    async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        self.fetch_list(&format!("/doctors/{}/appointments/", doctor_id)).await
    }

    async fn list_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        self.fetch_list(&format!("/patients/{}/appointments/", patient_id)).await
    }

    async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>, AppointmentError> {
        let path = format!("/appointments/{}/", appointment_id);
        self.client
            .request_optional::<Appointment>(Method::GET, &path, None)
            .await
            .map_err(network_error)
    }

    async fn insert(&self, record: NewAppointment) -> Result<Appointment, AppointmentError> {
        let body = encode(&record)?;
        self.client
            .request::<Appointment>(Method::POST, "/appointments/", Some(body))
            .await
            .map_err(network_error)
    }

    async fn patch(
        &self,
        appointment_id: &str,
        fields: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentError> {
        let path = format!("/appointments/{}/", appointment_id);
        let body = encode(fields)?;
        self.client
            .request_optional::<Appointment>(Method::PATCH, &path, Some(body))
            .await
            .map_err(network_error)
    }

    async fn delete(&self, appointment_id: &str) -> Result<bool, AppointmentError> {
        let path = format!("/appointments/{}/", appointment_id);
        self.client
            .request_no_content(Method::DELETE, &path)
            .await
            .map_err(network_error)
    }
}
