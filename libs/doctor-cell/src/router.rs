use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::DoctorService;

pub fn doctor_routes(service: Arc<DoctorService>) -> Router {
    Router::new()
        .route("/doctors/", get(handlers::search_doctors))
        .route("/doctors/{doctor_id}/", get(handlers::get_doctor))
        .route("/doctors/{doctor_id}/availabilities/", get(handlers::get_doctor_availability))
        .with_state(service)
}
