use axum::{
    extract::{Path, State},
    response::Json,
};
use medinfo_core::{
    group_by_category, BodyPart, BodyPartDetail, ContactSubmission, Envelope, HealthTip,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ApiJson;
use crate::error::ApiResult;
use crate::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/body-parts
pub async fn body_parts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<BodyPart>>>> {
    Ok(Json(Envelope::ok(state.store.list_body_parts()?)))
}

/// GET /api/body-part/{slug}
pub async fn body_part_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Envelope<BodyPartDetail>>> {
    let detail = state
        .store
        .body_part_detail(&slug, state.config.storage.medicine_aggregation)?;
    Ok(Json(Envelope::ok(detail)))
}

/// GET /api/health-tips, grouped by category
pub async fn health_tips(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<BTreeMap<String, Vec<HealthTip>>>>> {
    let tips = state.store.active_tips()?;
    Ok(Json(Envelope::ok(group_by_category(tips))))
}

/// POST /api/contact
pub async fn contact(
    State(state): State<Arc<AppState>>,
    ApiJson(submission): ApiJson<ContactSubmission>,
) -> ApiResult<Json<Envelope<()>>> {
    let submission = submission.normalized()?;
    let id = state.store.insert_message(&submission)?;
    tracing::info!(id, "Contact message received");
    Ok(Json(Envelope::done("Message sent successfully!")))
}
