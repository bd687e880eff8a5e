use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use medinfo_core::{DoctorInput, DoctorListing, Envelope};
use serde_json::Value;
use std::sync::Arc;

use super::{created, ApiJson};
use crate::error::{ApiError, ApiResult};
use crate::session::AdminSession;
use crate::AppState;

fn validate(input: &DoctorInput) -> ApiResult<()> {
    if input.name.trim().is_empty() || input.specialization.trim().is_empty() {
        return Err(ApiError::bad_request("Name and specialization are required"));
    }
    Ok(())
}

/// GET /admin/doctors
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<DoctorListing>>>> {
    Ok(Json(Envelope::ok(state.store.list_doctors()?)))
}

/// POST /admin/doctor
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    ApiJson(input): ApiJson<DoctorInput>,
) -> ApiResult<Json<Envelope<Value>>> {
    validate(&input)?;
    let id = state.store.insert_doctor(&input)?;
    tracing::info!(admin = %session.email, entity = "doctor", id, "Created");
    Ok(Json(created(id, "Doctor added successfully")))
}

/// PUT /admin/doctor/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<DoctorInput>,
) -> ApiResult<Json<Envelope<()>>> {
    validate(&input)?;
    state.store.update_doctor(id, &input)?;
    tracing::info!(admin = %session.email, entity = "doctor", id, "Updated");
    Ok(Json(Envelope::done("Doctor updated successfully")))
}

/// DELETE /admin/doctor/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<()>>> {
    state.store.delete_doctor(id)?;
    tracing::info!(admin = %session.email, entity = "doctor", id, "Deleted");
    Ok(Json(Envelope::done("Doctor deleted successfully")))
}
