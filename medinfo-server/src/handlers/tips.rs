use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use medinfo_core::{Envelope, HealthTip, HealthTipInput};
use serde_json::Value;
use std::sync::Arc;

use super::{created, ApiJson};
use crate::error::{ApiError, ApiResult};
use crate::session::AdminSession;
use crate::AppState;

/// GET /admin/tips, including inactive ones
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<HealthTip>>>> {
    Ok(Json(Envelope::ok(state.store.list_tips()?)))
}

/// POST /admin/tip
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    ApiJson(input): ApiJson<HealthTipInput>,
) -> ApiResult<Json<Envelope<Value>>> {
    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(ApiError::bad_request("Title and description are required"));
    }
    let id = state.store.insert_tip(&input)?;
    tracing::info!(admin = %session.email, entity = "tip", id, "Created");
    Ok(Json(created(id, "Tip added successfully")))
}

/// DELETE /admin/tip/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<()>>> {
    state.store.delete_tip(id)?;
    tracing::info!(admin = %session.email, entity = "tip", id, "Deleted");
    Ok(Json(Envelope::done("Tip deleted successfully")))
}
