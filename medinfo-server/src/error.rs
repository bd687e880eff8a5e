//! HTTP error mapping. Every failure leaves as an envelope with
//! `success: false` and a status derived from the error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use medinfo_core::{Envelope, MedinfoError};
use medinfo_store::StoreError;

/// Message returned in place of any storage failure detail
pub const STORAGE_ERROR_MESSAGE: &str = "Internal storage error";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", entity))
    }

    fn storage(detail: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Storage failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, STORAGE_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::error(self.message))).into_response()
    }
}

impl From<MedinfoError> for ApiError {
    fn from(err: MedinfoError) -> Self {
        match err {
            MedinfoError::NotFound { entity, .. } => Self::not_found(&entity),
            MedinfoError::Unauthorized(message) => Self::unauthorized(message),
            MedinfoError::Validation { message } => Self::bad_request(message),
            MedinfoError::PayloadTooLarge { limit } => Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File too large (max {} bytes)", limit),
            ),
            MedinfoError::Storage(detail) => Self::storage(&detail),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if let Some(kind) = err.constraint_violation() {
            tracing::warn!(error = %err, "Constraint violation");
            return Self::bad_request(format!("Constraint violation: {}", kind));
        }
        match err {
            StoreError::NotFound { entity, .. } => Self::not_found(&entity),
            other => Self::storage(&other),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!(error = %err, "File system failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal file error")
    }
}
