use std::time::Duration;

use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::{AppConfig, BackendMode};

pub struct TestConfig {
    pub backend_api_url: String,
    pub slot_minutes: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_api_url: "http://localhost:8000/api".to_string(),
            slot_minutes: 30,
        }
    }
}

impl TestConfig {
    /// Config pointed at a mock backend (e.g. a `wiremock` server URI).
    pub fn rest(backend_api_url: &str) -> Self {
        Self {
            backend_api_url: backend_api_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_mode: BackendMode::Rest,
            backend_api_url: self.backend_api_url.clone(),
            backend_timeout: Duration::from_secs(2),
            slot_minutes: self.slot_minutes,
            seed_demo_data: false,
            ..AppConfig::default()
        }
    }
}

/// JSON bodies shaped like the clinic backend's responses.
pub struct MockClinicResponses;

impl MockClinicResponses {
    /// Doctor available Monday and Wednesday 09:00-17:00 and Friday 09:00-15:00.
    pub fn doctor_response(doctor_id: &str, first_name: &str, last_name: &str, specialization: &str) -> Value {
        json!({
            "id": doctor_id,
            "first_name": first_name,
            "last_name": last_name,
            "email": format!("{}.{}@healthcare.com", first_name.to_lowercase(), last_name.to_lowercase()),
            "biography": "Board-certified physician",
            "specializations": [
                { "id": "1", "name": specialization }
            ],
            "availability": [
                Self::availability_response(doctor_id, "Monday", "09:00", "17:00"),
                Self::availability_response(doctor_id, "Wednesday", "09:00", "17:00"),
                Self::availability_response(doctor_id, "Friday", "09:00", "15:00")
            ]
        })
    }

    pub fn availability_response(doctor_id: &str, day: &str, start_time: &str, end_time: &str) -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "doctor_id": doctor_id,
            "day": day,
            "start_time": start_time,
            "end_time": end_time
        })
    }

    pub fn appointment_response(
        appointment_id: &str,
        patient_id: &str,
        doctor_id: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
        status: &str,
    ) -> Value {
        json!({
            "id": appointment_id,
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "date": date,
            "start_time": start_time,
            "end_time": end_time,
            "status": status,
            "reason": "Annual checkup",
            "notes": null
        })
    }

    pub fn patient_response(patient_id: &str, email: &str, name: &str) -> Value {
        json!({
            "id": patient_id,
            "email": email,
            "name": name,
            "date_of_birth": "1985-03-15",
            "phone": "555-123-4567",
            "address": "123 Main St, Anytown, USA",
            "insurance_provider": "Blue Cross",
            "insurance_id": "BC123456789",
            "medical_history": ["Asthma"]
        })
    }

    pub fn medical_record_response(record_id: &str, patient_id: &str, appointment_id: Option<&str>) -> Value {
        json!({
            "id": record_id,
            "patient_id": patient_id,
            "appointment_id": appointment_id,
            "diagnosis": "Mild osteoarthritis",
            "prescription": "Ibuprofen 400mg",
            "notes": null,
            "created_at": "2023-06-06T10:00:00Z"
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "error": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::rest("http://127.0.0.1:9999");
        let app_config = config.to_app_config();

        assert_eq!(app_config.backend_api_url, "http://127.0.0.1:9999");
        assert_eq!(app_config.backend_mode, BackendMode::Rest);
        assert!(!app_config.seed_demo_data);
    }

    #[test]
    fn doctor_fixture_carries_weekly_availability() {
        let doctor = MockClinicResponses::doctor_response("4", "Emily", "Carter", "Cardiology");
        assert_eq!(doctor["availability"].as_array().map(Vec::len), Some(3));
        assert_eq!(doctor["email"], "emily.carter@healthcare.com");
    }
}
