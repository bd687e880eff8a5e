pub mod dashboard;
pub mod doctors;
pub mod illnesses;
pub mod medicines;
pub mod messages;
pub mod public;
pub mod tips;

use axum::extract::{rejection::JsonRejection, FromRequest};
use medinfo_core::Envelope;
use serde_json::{json, Value};

use crate::error::ApiError;

/// JSON body extractor whose rejection is an envelope instead of plain text
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

/// Envelope for a freshly created row: `{id}` plus a message
pub fn created(id: i64, message: &str) -> Envelope<Value> {
    Envelope::ok(json!({ "id": id })).with_message(message)
}
