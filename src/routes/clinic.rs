//! Patient, doctor and appointment routes.

use crate::handlers::{
    create_appointment, create_doctor, create_patient, delete_patient, get_patient, list_doctors,
    list_patients, search_patients, todays_appointments, update_patient,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn clinic_routes(state: AppState) -> Router {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/search/:name", get(search_patients))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route("/appointments", post(create_appointment))
        .route("/appointments/today", get(todays_appointments))
        .with_state(state)
}
