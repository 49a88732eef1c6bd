// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::BookingEngine;

pub fn appointment_routes(engine: Arc<BookingEngine>) -> Router {
    Router::new()
        // Core appointment management
        .route(
            "/appointments/",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route(
            "/appointments/{appointment_id}/",
            get(handlers::get_appointment)
                .patch(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )
        .route("/appointments/{appointment_id}/cancel/", post(handlers::cancel_appointment))
        .route("/appointments/{appointment_id}/confirm/", post(handlers::confirm_appointment))
        .route("/appointments/{appointment_id}/complete/", post(handlers::complete_appointment))

        // Availability
        .route("/doctors/{doctor_id}/slots/", get(handlers::get_available_slots))
        .route("/check-availability/", post(handlers::check_availability))

        // Listings
        .route("/doctors/{doctor_id}/appointments/", get(handlers::get_doctor_appointments))
        .route("/patients/{patient_id}/appointments/", get(handlers::get_patient_appointments))
        .with_state(engine)
}
