use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{Doctor, DoctorPayload};
use crate::response::created;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// GET /doctors
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>, AppError> {
    Ok(Json(state.store.list_doctors().await?))
}

/// POST /doctors — specialty falls back to the generic label.
pub async fn create_doctor(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DoctorPayload>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = RequestValidator::new_doctor(body)?;
    let row = state.store.create_doctor(&doctor).await?;
    tracing::info!(doctor_id = row.doctor_id, "doctor created");
    Ok(created(row))
}
