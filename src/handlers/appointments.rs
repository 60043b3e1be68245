use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{AppointmentPayload, TodayAppointment};
use crate::response::created;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// GET /appointments/today
pub async fn todays_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodayAppointment>>, AppError> {
    Ok(Json(state.store.todays_appointments().await?))
}

/// POST /appointments — dangling patient or doctor ids are rejected by the store.
pub async fn create_appointment(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = RequestValidator::new_appointment(body)?;
    let row = state.store.create_appointment(&appointment).await?;
    tracing::info!(appointment_id = row.appointment_id, "appointment created");
    Ok(created(row))
}
