// apps/api/src/seed.rs
use chrono::NaiveDate;
use serde_json::json;

use appointment_cell::models::Appointment;
use doctor_cell::models::Doctor;
use patient_cell::models::Patient;

/// Demo roster for memory mode.
pub struct DemoData {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
}

/// `today` dates the one upcoming appointment.
pub fn demo_data(today: NaiveDate) -> serde_json::Result<DemoData> {
    let doctors = serde_json::from_value(json!([
        {
            "id": "4",
            "first_name": "Emily",
            "last_name": "Carter",
            "email": "doctor1@healthcare.com",
            "biography": "Dr. Carter is a board-certified cardiologist with over 10 years of experience in diagnosing and treating heart conditions.",
            "specializations": [
                { "id": "1", "name": "Cardiology" },
                { "id": "9", "name": "Internal Medicine" }
            ],
            "availability": [
                { "id": "1", "doctor_id": "4", "day": "Monday", "start_time": "09:00", "end_time": "17:00" },
                { "id": "2", "doctor_id": "4", "day": "Wednesday", "start_time": "09:00", "end_time": "17:00" },
                { "id": "3", "doctor_id": "4", "day": "Friday", "start_time": "09:00", "end_time": "15:00" }
            ]
        },
        {
            "id": "5",
            "first_name": "James",
            "last_name": "Rodriguez",
            "email": "doctor2@healthcare.com",
            "biography": "Dr. Rodriguez specializes in orthopedic surgery and sports medicine, with a focus on minimally invasive procedures.",
            "specializations": [
                { "id": "4", "name": "Orthopedics" },
                { "id": "10", "name": "Family Medicine" }
            ],
            "availability": [
                { "id": "4", "doctor_id": "5", "day": "Tuesday", "start_time": "08:00", "end_time": "16:00" },
                { "id": "5", "doctor_id": "5", "day": "Thursday", "start_time": "08:00", "end_time": "16:00" },
                { "id": "6", "doctor_id": "5", "day": "Saturday", "start_time": "10:00", "end_time": "14:00" }
            ]
        }
    ]))?;

    let patients = serde_json::from_value(json!([
        {
            "id": "2",
            "name": "Sarah Johnson",
            "email": "patient1@example.com",
            "date_of_birth": "1985-03-15",
            "phone": "555-123-4567",
            "address": "123 Main St, Anytown, USA",
            "insurance_provider": "Blue Cross",
            "insurance_id": "BC123456789",
            "medical_history": ["Asthma", "Allergies: Pollen"]
        },
        {
            "id": "3",
            "name": "Michael Wilson",
            "email": "patient2@example.com",
            "date_of_birth": "1992-07-22",
            "phone": "555-987-6543",
            "address": "456 Elm St, Somewhere, USA",
            "insurance_provider": "Aetna",
            "insurance_id": "AE987654321",
            "medical_history": ["Hypertension"]
        }
    ]))?;

    let appointments = serde_json::from_value(json!([
        {
            "id": "1",
            "patient_id": "2",
            "doctor_id": "4",
            "date": "2023-06-05",
            "start_time": "10:00",
            "end_time": "10:30",
            "status": "completed",
            "reason": "Annual checkup",
            "notes": "Patient reported occasional chest pain. EKG normal. Follow-up in 3 months recommended.",
            "patient_name": "Sarah Johnson",
            "doctor_name": "Dr. Emily Carter"
        },
        {
            "id": "2",
            "patient_id": "3",
            "doctor_id": "5",
            "date": "2023-06-06",
            "start_time": "09:30",
            "end_time": "10:00",
            "status": "completed",
            "reason": "Knee pain evaluation",
            "notes": "X-rays showed mild osteoarthritis. Prescribed anti-inflammatory medication and physical therapy.",
            "patient_name": "Michael Wilson",
            "doctor_name": "Dr. James Rodriguez"
        },
        {
            "id": "3",
            "patient_id": "2",
            "doctor_id": "5",
            "date": today,
            "start_time": "14:00",
            "end_time": "14:30",
            "status": "confirmed",
            "reason": "Back pain follow-up",
            "notes": null,
            "patient_name": "Sarah Johnson",
            "doctor_name": "Dr. James Rodriguez"
        }
    ]))?;

    Ok(DemoData {
        doctors,
        patients,
        appointments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use appointment_cell::models::AppointmentStatus;

    #[test]
    fn demo_data_decodes() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let data = demo_data(today).unwrap();

        assert_eq!(data.doctors.len(), 2);
        assert_eq!(data.patients.len(), 2);
        assert_eq!(data.appointments.len(), 3);
        assert_eq!(data.appointments[2].date, today);
        assert_eq!(data.appointments[2].status, AppointmentStatus::Confirmed);
        assert!(data.doctors[1].has_specialization("family medicine"));
    }
}
