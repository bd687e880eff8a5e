use axum::{extract::State, response::Json};
use medinfo_core::{BodyPart, DashboardStats, Envelope, IllnessOption};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::AppState;

/// GET /admin/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<DashboardStats>>> {
    Ok(Json(Envelope::ok(state.store.stats()?)))
}

/// GET /admin/body-parts, for form dropdowns
pub async fn body_parts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<BodyPart>>>> {
    Ok(Json(Envelope::ok(state.store.list_body_parts_by_name()?)))
}

/// GET /admin/illnesses-list
pub async fn illness_options(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<Vec<IllnessOption>>>> {
    Ok(Json(Envelope::ok(state.store.illness_options()?)))
}
