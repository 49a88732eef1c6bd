// libs/appointment-cell/src/services/conflict.rs
use chrono::NaiveDate;
use tracing::{debug, warn};

use shared_models::{scheduling::intervals_overlap, TimeRange};

use crate::models::{Appointment, AppointmentStatus};

/// Overlap checks over a doctor's existing bookings.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConflictDetectionService;

impl ConflictDetectionService {
    pub fn new() -> Self {
        Self
    }

    /// Active appointments on `date` whose interval overlaps `requested`.
    /// `exclude_appointment_id` skips the appointment being moved.
    pub fn find_conflicts<'a>(
        &self,
        existing: &'a [Appointment],
        date: NaiveDate,
        requested: &TimeRange,
        exclude_appointment_id: Option<&str>,
    ) -> Vec<&'a Appointment> {
        let conflicting: Vec<&Appointment> = existing
            .iter()
            .filter(|appointment| appointment.date == date)
            .filter(|appointment| Some(appointment.id.as_str()) != exclude_appointment_id)
            .filter(|appointment| self.is_active_appointment(appointment.status))
            .filter(|appointment| {
                self.appointments_overlap(requested, &appointment.time_range())
            })
            .collect();

        if !conflicting.is_empty() {
            warn!(
                "Conflict detected on {} for {} - {} conflicting appointments",
                date,
                requested,
                conflicting.len()
            );
        }

        conflicting
    }

    pub fn has_conflict(
        &self,
        existing: &[Appointment],
        date: NaiveDate,
        requested: &TimeRange,
        exclude_appointment_id: Option<&str>,
    ) -> bool {
        !self
            .find_conflicts(existing, date, requested, exclude_appointment_id)
            .is_empty()
    }

    /// Intervals held by active appointments on `date`.
    pub fn booked_ranges(&self, existing: &[Appointment], date: NaiveDate) -> Vec<TimeRange> {
        let booked: Vec<TimeRange> = existing
            .iter()
            .filter(|appointment| appointment.date == date)
            .filter(|appointment| self.is_active_appointment(appointment.status))
            .map(Appointment::time_range)
            .collect();

        debug!("{} booked intervals on {}", booked.len(), date);
        booked
    }

    fn appointments_overlap(&self, a: &TimeRange, b: &TimeRange) -> bool {
        intervals_overlap(a.start_time, a.end_time, b.start_time, b.end_time)
    }

    fn is_active_appointment(&self, status: AppointmentStatus) -> bool {
        status.occupies_slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn appointment(id: &str, start: NaiveTime, end: NaiveTime, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: id.to_string(),
            patient_id: "2".to_string(),
            doctor_id: "4".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
            start_time: start,
            end_time: end,
            status,
            reason: "Checkup".to_string(),
            notes: None,
            patient_name: None,
            doctor_name: None,
        }
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let service = ConflictDetectionService::new();
        let existing = vec![appointment("1", at(10, 0), at(10, 30), AppointmentStatus::Scheduled)];
        let date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();

        let after = TimeRange::new(at(10, 30), at(11, 0)).unwrap();
        let before = TimeRange::new(at(9, 30), at(10, 0)).unwrap();
        let inside = TimeRange::new(at(10, 15), at(10, 45)).unwrap();

        assert!(!service.has_conflict(&existing, date, &after, None));
        assert!(!service.has_conflict(&existing, date, &before, None));
        assert!(service.has_conflict(&existing, date, &inside, None));
    }

    #[test]
    fn cancelled_and_excluded_appointments_are_ignored() {
        let service = ConflictDetectionService::new();
        let existing = vec![
            appointment("1", at(10, 0), at(10, 30), AppointmentStatus::Cancelled),
            appointment("2", at(11, 0), at(11, 30), AppointmentStatus::Confirmed),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();

        let over_cancelled = TimeRange::new(at(10, 0), at(10, 30)).unwrap();
        let over_self = TimeRange::new(at(11, 15), at(11, 45)).unwrap();

        assert!(!service.has_conflict(&existing, date, &over_cancelled, None));
        assert!(!service.has_conflict(&existing, date, &over_self, Some("2")));
        assert_eq!(service.booked_ranges(&existing, date).len(), 1);
    }

    #[test]
    fn other_dates_never_conflict() {
        let service = ConflictDetectionService::new();
        let existing = vec![appointment("1", at(10, 0), at(10, 30), AppointmentStatus::Scheduled)];
        let other_day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let same_time = TimeRange::new(at(10, 0), at(10, 30)).unwrap();

        assert!(!service.has_conflict(&existing, other_day, &same_time, None));
    }
}
