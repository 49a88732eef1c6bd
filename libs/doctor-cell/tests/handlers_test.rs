use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::models::Doctor;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::{DoctorService, InMemoryDoctorDirectory};
use shared_utils::test_utils::MockClinicResponses;

fn create_test_app() -> Router {
    let doctors: Vec<Doctor> = vec![
        serde_json::from_value(MockClinicResponses::doctor_response("4", "Emily", "Carter", "Cardiology")).unwrap(),
        serde_json::from_value(MockClinicResponses::doctor_response("5", "James", "Rodriguez", "Orthopedics")).unwrap(),
    ];
    let directory = Arc::new(InMemoryDoctorDirectory::new(doctors));
    doctor_routes(Arc::new(DoctorService::new(directory)))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_list_doctors() {
    let (status, body) = get_json(create_test_app(), "/doctors/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_search_doctors_by_specialization_is_case_insensitive() {
    let (status, body) = get_json(create_test_app(), "/doctors/?specialization=orthopedics").await;

    assert_eq!(status, StatusCode::OK);
    let doctors = body.as_array().unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["id"], "5");
}

#[tokio::test]
async fn test_get_doctor_availability_uses_day_names() {
    let (status, body) = get_json(create_test_app(), "/doctors/4/availabilities/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["day"], "Monday");
    assert_eq!(body[0]["start_time"], "09:00");
}

#[tokio::test]
async fn test_get_unknown_doctor_returns_404() {
    let (status, body) = get_json(create_test_app(), "/doctors/999/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Doctor not found");
}
