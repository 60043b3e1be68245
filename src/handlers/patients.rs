//! Patient handlers: list, search, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{JsonBody, RowId};
use crate::model::{Patient, PatientPayload};
use crate::response::{created, DeletedPatient};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

const PATIENT_NOT_FOUND: &str = "Patient not found";

/// GET /patients — newest first.
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, AppError> {
    Ok(Json(state.store.list_patients().await?))
}

/// GET /patients/search/:name
pub async fn search_patients(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Patient>>, AppError> {
    Ok(Json(state.store.search_patients(&name).await?))
}

/// GET /patients/:id
pub async fn get_patient(
    State(state): State<AppState>,
    RowId(id): RowId,
) -> Result<Json<Patient>, AppError> {
    let row = state
        .store
        .get_patient(id)
        .await?
        .ok_or(AppError::NotFound(PATIENT_NOT_FOUND))?;
    Ok(Json(row))
}

/// POST /patients
pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<PatientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let patient = RequestValidator::new_patient(body)?;
    let row = state.store.create_patient(&patient).await?;
    tracing::info!(patient_id = row.patient_id, "patient created");
    Ok(created(row))
}

/// PUT /patients/:id — fields are not checked for presence.
pub async fn update_patient(
    State(state): State<AppState>,
    RowId(id): RowId,
    JsonBody(body): JsonBody<PatientPayload>,
) -> Result<Json<Patient>, AppError> {
    let update = RequestValidator::patient_update(body)?;
    let row = state
        .store
        .update_patient(id, &update)
        .await?
        .ok_or(AppError::NotFound(PATIENT_NOT_FOUND))?;
    Ok(Json(row))
}

/// DELETE /patients/:id
pub async fn delete_patient(
    State(state): State<AppState>,
    RowId(id): RowId,
) -> Result<Json<DeletedPatient>, AppError> {
    let row = state
        .store
        .delete_patient(id)
        .await?
        .ok_or(AppError::NotFound(PATIENT_NOT_FOUND))?;
    tracing::info!(patient_id = row.patient_id, "patient deleted");
    Ok(Json(DeletedPatient::new(row)))
}
