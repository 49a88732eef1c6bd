// apps/api/src/state.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use appointment_cell::services::{
    AppointmentStore, BookingEngine, InMemoryAppointmentStore, RestAppointmentStore,
};
use doctor_cell::services::{
    AvailabilityService, DoctorDirectory, DoctorService, InMemoryDoctorDirectory, RestDoctorDirectory,
};
use patient_cell::services::{
    InMemoryMedicalRecordStore, InMemoryPatientDirectory, MedicalRecordStore, PatientDirectory,
    PatientService, RestMedicalRecordStore, RestPatientDirectory,
};
use shared_config::{AppConfig, BackendMode};
use shared_database::RestClient;

use crate::seed;

/// Services shared by every cell router.
#[derive(Clone)]
pub struct AppState {
    pub doctors: Arc<DoctorService>,
    pub patients: Arc<PatientService>,
    pub booking: Arc<BookingEngine>,
}

struct Backends {
    doctors: Arc<dyn DoctorDirectory>,
    patients: Arc<dyn PatientDirectory>,
    records: Arc<dyn MedicalRecordStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backends = match config.backend_mode {
            BackendMode::Memory => memory_backends(config.seed_demo_data)?,
            BackendMode::Rest => rest_backends(config)?,
        };

        let availability = AvailabilityService::new(config.slot_minutes);

        Ok(Self {
            doctors: Arc::new(DoctorService::new(Arc::clone(&backends.doctors))),
            patients: Arc::new(PatientService::new(backends.patients, backends.records)),
            booking: Arc::new(BookingEngine::with_availability(
                backends.appointments,
                backends.doctors,
                availability,
            )),
        })
    }
}

fn memory_backends(seed_demo_data: bool) -> Result<Backends> {
    if !seed_demo_data {
        info!("Using empty in-memory stores");
        return Ok(Backends {
            doctors: Arc::new(InMemoryDoctorDirectory::default()),
            patients: Arc::new(InMemoryPatientDirectory::default()),
            records: Arc::new(InMemoryMedicalRecordStore::default()),
            appointments: Arc::new(InMemoryAppointmentStore::default()),
        });
    }

    let demo = seed::demo_data(Local::now().date_naive()).context("failed to build demo data")?;
    info!(
        "Seeded in-memory stores with {} doctors, {} patients, {} appointments",
        demo.doctors.len(),
        demo.patients.len(),
        demo.appointments.len()
    );

    Ok(Backends {
        doctors: Arc::new(InMemoryDoctorDirectory::new(demo.doctors)),
        patients: Arc::new(InMemoryPatientDirectory::new(demo.patients)),
        records: Arc::new(InMemoryMedicalRecordStore::default()),
        appointments: Arc::new(InMemoryAppointmentStore::new(demo.appointments)),
    })
}

// One client so the session cookie jar is shared by every store.
fn rest_backends(config: &AppConfig) -> Result<Backends> {
    if !config.is_configured() {
        anyhow::bail!("BACKEND_API_URL must be set when BACKEND_MODE=rest");
    }

    let client = RestClient::new(config).context("failed to build backend HTTP client")?;
    info!("Using REST backend at {}", client.get_base_url());

    Ok(Backends {
        doctors: Arc::new(RestDoctorDirectory::new(client.clone())),
        patients: Arc::new(RestPatientDirectory::new(client.clone())),
        records: Arc::new(RestMedicalRecordStore::new(client.clone())),
        appointments: Arc::new(RestAppointmentStore::new(client)),
    })
}
