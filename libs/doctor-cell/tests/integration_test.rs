use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::DoctorError;
use doctor_cell::services::{DoctorDirectory, RestDoctorDirectory};
use shared_database::RestClient;
use shared_utils::test_utils::{MockClinicResponses, TestConfig};

async fn rest_directory(mock_server: &MockServer) -> RestDoctorDirectory {
    let config = TestConfig::rest(&mock_server.uri()).to_app_config();
    RestDoctorDirectory::new(RestClient::new(&config).unwrap())
}

#[tokio::test]
async fn test_rest_directory_fetches_doctor() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockClinicResponses::doctor_response("4", "Emily", "Carter", "Cardiology"),
        ))
        .mount(&mock_server)
        .await;

    let directory = rest_directory(&mock_server).await;
    let doctor = directory.get_doctor("4").await.unwrap().unwrap();

    assert_eq!(doctor.full_name(), "Dr. Emily Carter");
    assert!(doctor.has_specialization("cardiology"));
    assert_eq!(doctor.availability.len(), 3);
}

#[tokio::test]
async fn test_rest_directory_missing_doctor_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/404/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&mock_server)
        .await;

    let directory = rest_directory(&mock_server).await;
    assert!(directory.get_doctor("404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rest_directory_server_error_is_network_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .respond_with(ResponseTemplate::new(503).set_body_json(MockClinicResponses::error_response("maintenance")))
        .mount(&mock_server)
        .await;

    let directory = rest_directory(&mock_server).await;
    let result = directory.list_doctors().await;

    assert_matches!(result, Err(DoctorError::Network(msg)) if msg.contains("503"));
}
