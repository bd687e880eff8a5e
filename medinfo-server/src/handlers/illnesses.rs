use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use medinfo_core::{Envelope, IllnessInput, IllnessListing};
use serde_json::Value;
use std::sync::Arc;

use super::{created, ApiJson};
use crate::error::{ApiError, ApiResult};
use crate::session::AdminSession;
use crate::AppState;

fn validate(input: &IllnessInput) -> ApiResult<()> {
    if input.name.trim().is_empty() {
        return Err(ApiError::bad_request("Illness name is required"));
    }
    if input.medicines.iter().any(|m| m.name.trim().is_empty()) {
        return Err(ApiError::bad_request("Medicine name is required"));
    }
    Ok(())
}

/// GET /admin/illnesses, including inactive ones
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<IllnessListing>>>> {
    Ok(Json(Envelope::ok(state.store.list_illnesses()?)))
}

/// POST /admin/illness. Initial medicines are inserted in the same transaction.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    ApiJson(input): ApiJson<IllnessInput>,
) -> ApiResult<Json<Envelope<Value>>> {
    validate(&input)?;
    let id = state.store.insert_illness(&input)?;
    tracing::info!(
        admin = %session.email,
        entity = "illness",
        id,
        medicines = input.medicines.len(),
        "Created"
    );
    Ok(Json(created(id, "Illness added successfully")))
}

/// PUT /admin/illness/{id}. Setting `is_active` to false hides it from the public site.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<IllnessInput>,
) -> ApiResult<Json<Envelope<()>>> {
    validate(&input)?;
    state.store.update_illness(id, &input)?;
    tracing::info!(admin = %session.email, entity = "illness", id, "Updated");
    Ok(Json(Envelope::done("Illness updated successfully")))
}

/// DELETE /admin/illness/{id}. Removes its medicines too.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<()>>> {
    state.store.delete_illness(id)?;
    tracing::info!(admin = %session.email, entity = "illness", id, "Deleted");
    Ok(Json(Envelope::done("Illness deleted successfully")))
}
