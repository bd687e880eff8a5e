use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use medinfo_core::{ContactMessage, Envelope};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::session::AdminSession;
use crate::AppState;

/// GET /admin/messages, newest first
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<ContactMessage>>>> {
    Ok(Json(Envelope::ok(state.store.list_messages()?)))
}

/// POST /admin/message/{id}/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<()>>> {
    state.store.mark_message_read(id)?;
    tracing::debug!(admin = %session.email, entity = "message", id, "Marked read");
    Ok(Json(Envelope::done("Marked as read")))
}
