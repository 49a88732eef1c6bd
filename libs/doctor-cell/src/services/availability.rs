// libs/doctor-cell/src/services/availability.rs

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use shared_models::TimeRange;

use crate::models::Doctor;

pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Derives bookable slots from a doctor's weekly recurring availability.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityService {
    slot_minutes: u32,
}

impl Default for AvailabilityService {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_MINUTES)
    }
}

impl AvailabilityService {
    pub fn new(slot_minutes: u32) -> Self {
        Self {
            slot_minutes: slot_minutes.max(1),
        }
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Availability windows whose weekday matches `date`, sorted by start.
    pub fn weekly_windows(&self, doctor: &Doctor, date: NaiveDate) -> Vec<TimeRange> {
        let weekday = date.weekday();
        let mut windows: Vec<TimeRange> = doctor
            .availability
            .iter()
            .filter(|slot| slot.day == weekday)
            .filter_map(|slot| slot.window())
            .collect();
        windows.sort();
        windows
    }

    /// Fixed-length slots laid from each window's start; a trailing partial slot is dropped.
    pub fn candidate_slots(&self, doctor: &Doctor, date: NaiveDate) -> Vec<TimeRange> {
        let step = Duration::minutes(i64::from(self.slot_minutes));
        let mut slots = Vec::new();

        for window in self.weekly_windows(doctor, date) {
            let mut current = window.start_time;
            loop {
                let (slot_end, wrapped) = current.overflowing_add_signed(step);
                if wrapped != 0 || slot_end > window.end_time {
                    break;
                }
                if let Some(slot) = TimeRange::new(current, slot_end) {
                    slots.push(slot);
                }
                current = slot_end;
            }
        }

        non_overlapping(slots)
    }

    /// Candidate slots minus any slot touching a booked interval.
    pub fn free_slots(&self, doctor: &Doctor, date: NaiveDate, booked: &[TimeRange]) -> Vec<TimeRange> {
        let free: Vec<TimeRange> = self
            .candidate_slots(doctor, date)
            .into_iter()
            .filter(|slot| !booked.iter().any(|taken| taken.overlaps(slot)))
            .collect();

        debug!(
            "Doctor {} has {} free slots on {} ({} booked intervals)",
            doctor.id,
            free.len(),
            date,
            booked.len()
        );

        free
    }
}

// Overlapping windows on the same day would otherwise emit overlapping slots.
fn non_overlapping(mut slots: Vec<TimeRange>) -> Vec<TimeRange> {
    slots.sort();
    let mut kept: Vec<TimeRange> = Vec::with_capacity(slots.len());
    for slot in slots {
        match kept.last() {
            Some(last) if last.overlaps(&slot) || *last == slot => continue,
            _ => kept.push(slot),
        }
    }
    kept
}
