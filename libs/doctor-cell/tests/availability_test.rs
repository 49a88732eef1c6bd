use chrono::{NaiveDate, NaiveTime};

use doctor_cell::models::Doctor;
use doctor_cell::services::AvailabilityService;
use shared_models::TimeRange;
use shared_utils::test_utils::MockClinicResponses;

fn carter() -> Doctor {
    serde_json::from_value(MockClinicResponses::doctor_response("4", "Emily", "Carter", "Cardiology")).unwrap()
}

fn t(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

fn range(start: &str, end: &str) -> TimeRange {
    TimeRange::new(t(start), t(end)).unwrap()
}

// 2024-06-03 is a Monday, 2024-06-04 a Tuesday, 2024-06-07 a Friday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

#[test]
fn test_monday_window_yields_half_hour_slots() {
    let service = AvailabilityService::default();
    let slots = service.candidate_slots(&carter(), monday());

    assert_eq!(slots.len(), 16);
    assert_eq!(slots.first(), Some(&range("09:00", "09:30")));
    assert_eq!(slots.last(), Some(&range("16:30", "17:00")));
    assert!(slots.windows(2).all(|pair| pair[0].end_time <= pair[1].start_time));
}

#[test]
fn test_day_without_availability_has_no_slots() {
    let service = AvailabilityService::default();
    let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

    assert!(service.weekly_windows(&carter(), tuesday).is_empty());
    assert!(service.candidate_slots(&carter(), tuesday).is_empty());
}

#[test]
fn test_booked_intervals_are_removed() {
    let service = AvailabilityService::default();
    let friday = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
    let booked = vec![range("10:00", "10:30"), range("13:15", "13:45")];

    let free = service.free_slots(&carter(), friday, &booked);

    assert_eq!(free.len(), 12 - 3);
    assert!(!free.contains(&range("10:00", "10:30")));
    assert!(!free.contains(&range("13:00", "13:30")));
    assert!(!free.contains(&range("13:30", "14:00")));
    assert!(free.contains(&range("09:30", "10:00")));
    assert!(free.contains(&range("10:30", "11:00")));
}

#[test]
fn test_trailing_partial_slot_is_dropped() {
    let mut doctor = carter();
    doctor.availability = vec![serde_json::from_value(
        MockClinicResponses::availability_response("4", "Monday", "09:00", "10:45"),
    )
    .unwrap()];

    let slots = AvailabilityService::new(30).candidate_slots(&doctor, monday());
    assert_eq!(slots, vec![range("09:00", "09:30"), range("09:30", "10:00"), range("10:00", "10:30")]);

    let hourly = AvailabilityService::new(60).candidate_slots(&doctor, monday());
    assert_eq!(hourly, vec![range("09:00", "10:00")]);
}

#[test]
fn test_overlapping_windows_do_not_produce_overlapping_slots() {
    let mut doctor = carter();
    doctor.availability = vec![
        serde_json::from_value(MockClinicResponses::availability_response("4", "Monday", "09:00", "10:00")).unwrap(),
        serde_json::from_value(MockClinicResponses::availability_response("4", "Monday", "09:15", "10:15")).unwrap(),
    ];

    let slots = AvailabilityService::default().candidate_slots(&doctor, monday());

    assert_eq!(slots, vec![range("09:00", "09:30"), range("09:30", "10:00")]);
}
