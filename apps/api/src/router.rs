use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::create_patient_router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic scheduling API is running!" }))
        .merge(doctor_routes(state.doctors))
        .merge(create_patient_router(state.patients))
        .merge(appointment_routes(state.booking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use shared_config::AppConfig;
    use tower::ServiceExt;

    fn seeded_app() -> Router {
        let config = AppConfig::default();
        create_router(AppState::from_config(&config).unwrap())
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let (status, body) = call(seeded_app(), "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Clinic scheduling API is running!");
    }

    #[tokio::test]
    async fn all_cells_are_mounted() {
        let app = seeded_app();

        for uri in [
            "/doctors/",
            "/doctors/4/",
            "/doctors/5/availabilities/",
            "/doctors/5/appointments/",
            "/patients/",
            "/patients/2/",
            "/patients/2/appointments/",
            "/patients/2/medical-records/",
            "/appointments/",
            "/appointments/1/",
            "/medical-records/",
        ] {
            let (status, _) = call(app.clone(), "GET", uri, None).await;
            assert_eq!(status, StatusCode::OK, "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn seeded_appointment_blocks_its_slot() {
        // 2023-06-05 is a Monday; completed appointment "1" still holds 10:00-10:30.
        let (status, body) = call(
            seeded_app(),
            "POST",
            "/check-availability/",
            Some(json!({ "doctor_id": "4", "date": "2023-06-05" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        let slots = body["available_slots"].as_array().unwrap();
        assert_eq!(slots.len(), 15);
        assert!(!slots.contains(&json!({ "start_time": "10:00", "end_time": "10:30" })));
    }
}
